#[cfg(not(feature = "loom"))]
mod cli {
    use std::process;

    use reorder_probe::{Config, Probe, pinning_supported};

    const USAGE: &str = "\
Usage: reorder-probe [OPTIONS]

Options:
  --fence <none|compiler|full>  barrier inside the transaction (default: compiler)
  --pin                         pin both workers to cpu 0
  --mask <N>                    delay mask, workers spin while rng & N != 0 (default: 7)
  --iters <N>                   stop after N trials (default: run forever)
  --seeds <A,B>                 delay seeds for the two workers (default: 1,2)
  --help                        print this message";

    fn parse_args(
        mut args: impl Iterator<Item = String>,
    ) -> Result<(Config, Option<u64>), String> {
        let mut config = Config::default();
        let mut iterations = None;

        fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
            args.next().ok_or_else(|| format!("{flag} needs a value"))
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fence" => config.fence = value(&mut args, "--fence")?.parse()?,
                "--pin" => config.pin_single_cpu = true,
                "--mask" => {
                    config.delay_mask = value(&mut args, "--mask")?
                        .parse()
                        .map_err(|e| format!("--mask: {e}"))?;
                }
                "--iters" => {
                    iterations = Some(
                        value(&mut args, "--iters")?
                            .parse()
                            .map_err(|e| format!("--iters: {e}"))?,
                    );
                }
                "--seeds" => {
                    let raw = value(&mut args, "--seeds")?;
                    let (a, b) = raw
                        .split_once(',')
                        .ok_or_else(|| format!("--seeds expects two values, got `{raw}`"))?;
                    config.seeds = [
                        a.trim().parse().map_err(|e| format!("--seeds: {e}"))?,
                        b.trim().parse().map_err(|e| format!("--seeds: {e}"))?,
                    ];
                }
                "--help" | "-h" => {
                    println!("{USAGE}");
                    process::exit(0);
                }
                other => return Err(format!("unknown option `{other}`")),
            }
        }

        if config.seeds[0] == config.seeds[1] {
            return Err("the two seeds must differ".into());
        }
        Ok((config, iterations))
    }

    pub fn main() {
        // Diagnostics go to stderr; stdout carries only the detection
        // report lines.
        tracing_subscriber::fmt()
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();

        let (config, iterations) = match parse_args(std::env::args().skip(1)) {
            Ok(parsed) => parsed,
            Err(msg) => {
                eprintln!("error: {msg}\n\n{USAGE}");
                process::exit(2);
            }
        };

        if config.pin_single_cpu && !pinning_supported() {
            tracing::warn!("thread pinning is not supported on this platform, running unpinned");
        }
        tracing::info!(
            fence = %config.fence,
            pin = config.pin_single_cpu,
            mask = config.delay_mask,
            "starting probe"
        );

        let probe = Probe::new(config);
        let detected = probe.run(iterations, |detected, iteration| {
            println!("{detected} reorders detected after {iteration} iterations");
            println!();
        });

        // Only reachable on a bounded run.
        if let Some(n) = iterations {
            println!("{detected} reorders detected in {n} iterations");
        }
    }
}

#[cfg(not(feature = "loom"))]
fn main() {
    cli::main();
}

// The binary is meaningless under loom; the loom feature exists for the
// model tests of the library.
#[cfg(feature = "loom")]
fn main() {}
