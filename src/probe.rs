use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;

use crate::delay::DelaySource;
use crate::fence::Fence;
use crate::sema::SpinSemaphore;
use crate::sys;

/// Experiment parameters. One `Config` describes one sweep point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Barrier applied between each worker's store and load.
    pub fence: Fence,
    /// Pin both workers to CPU 0 to suppress hardware-level reordering.
    pub pin_single_cpu: bool,
    /// Delay loop mask; a worker spins while `rng & mask != 0` before its
    /// transaction. 0 disables the delay.
    pub delay_mask: u32,
    /// Seeds for the two workers' delay streams. Must differ, or the
    /// workers' timing jitter correlates and the race windows shrink.
    pub seeds: [u64; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fence: Fence::Compiler,
            pin_single_cpu: false,
            delay_mask: 7,
            seeds: [1, 2],
        }
    }
}

// All state shared between the controller and the workers. The controller
// owns it for the duration of `run`; workers borrow it through scoped
// threads. Per cell there is exactly one writer and one reader, and never
// from the same thread; the semaphore handshake is what keeps the reset
// phase and the transaction phase from overlapping.
struct Arena {
    // Transaction flags. Relaxed atomics rather than plain integers: a
    // plain-int data race is undefined behavior in Rust, while relaxed
    // atomics stay races the hardware is free to reorder.
    x: AtomicU32,
    y: AtomicU32,
    // What each worker saw in the other's flag.
    r1: AtomicU32,
    r2: AtomicU32,
    begin1: SpinSemaphore,
    begin2: SpinSemaphore,
    end: SpinSemaphore,
    // Raised once before the final begin signals so bounded runs can join
    // the workers. Relaxed is enough: the begin semaphore's release/acquire
    // pair orders the store against the worker's load.
    stop: AtomicBool,
}

impl Arena {
    fn new() -> Self {
        Self {
            x: AtomicU32::new(0),
            y: AtomicU32::new(0),
            r1: AtomicU32::new(0),
            r2: AtomicU32::new(0),
            begin1: SpinSemaphore::new(0),
            begin2: SpinSemaphore::new(0),
            end: SpinSemaphore::new(0),
            stop: AtomicBool::new(false),
        }
    }
}

#[derive(Clone, Copy)]
enum Role {
    First,
    Second,
}

/// The detection harness: two transaction workers plus the controller loop
/// that races them, trial after trial.
pub struct Probe {
    config: Config,
}

impl Probe {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs trials until `iterations` is exhausted, calling `on_detect`
    /// with the cumulative detection count and the 1-based trial number
    /// each time a reordering is observed. Returns the detection count.
    ///
    /// `iterations: None` runs forever; the process then only ends by
    /// external termination, which is the intended mode for the binary.
    pub fn run(&self, iterations: Option<u64>, mut on_detect: impl FnMut(u64, u64)) -> u64 {
        let arena = Arena::new();
        let config = &self.config;

        thread::scope(|s| {
            s.spawn(|| transaction_loop(&arena, Role::First, config));
            s.spawn(|| transaction_loop(&arena, Role::Second, config));

            let mut detected = 0u64;
            let mut iteration = 0u64;
            loop {
                if iterations.is_some_and(|n| iteration >= n) {
                    break;
                }
                iteration += 1;

                // Both workers are idle here: their end signals from the
                // previous trial have already been consumed, so nobody can
                // be between begin-wait and end-signal while we reset.
                arena.x.store(0, Ordering::Relaxed);
                arena.y.store(0, Ordering::Relaxed);

                // The release in signal() publishes the reset; order of the
                // two signals is irrelevant.
                arena.begin1.signal();
                arena.begin2.signal();

                // Two permits, one per worker; which arrives first is
                // irrelevant, both are required.
                arena.end.wait();
                arena.end.wait();

                let r1 = arena.r1.load(Ordering::Relaxed);
                let r2 = arena.r2.load(Ordering::Relaxed);

                // Both stores are program-ordered before both loads, so in
                // any single global order at least one worker must read the
                // other's 1. Two stale reads means a store was delayed past
                // a load from the other thread's point of view.
                if r1 == 0 && r2 == 0 {
                    detected += 1;
                    on_detect(detected, iteration);
                }
            }

            // Release the workers one last time so they can see the stop
            // flag and exit, letting the scope join them.
            arena.stop.store(true, Ordering::Relaxed);
            arena.begin1.signal();
            arena.begin2.signal();

            detected
        })
    }
}

// One loop body for both workers; the role picks which flag is ours, which
// is theirs, and where the observation lands.
fn transaction_loop(arena: &Arena, role: Role, config: &Config) {
    if config.pin_single_cpu {
        if let Err(err) = sys::pin_current_thread(0) {
            tracing::warn!("cannot pin worker to cpu 0, running unpinned: {err}");
        }
    }

    let (seed, own, other, result, begin) = match role {
        Role::First => (config.seeds[0], &arena.x, &arena.y, &arena.r1, &arena.begin1),
        Role::Second => (config.seeds[1], &arena.y, &arena.x, &arena.r2, &arena.begin2),
    };
    let mut delay = DelaySource::new(seed);

    loop {
        begin.wait();
        if arena.stop.load(Ordering::Relaxed) {
            break;
        }

        // Random-length spin so the two transactions line up differently
        // on every trial.
        delay.jitter(config.delay_mask);

        // The transaction under observation.
        own.store(1, Ordering::Relaxed);
        config.fence.apply();
        result.store(other.load(Ordering::Relaxed), Ordering::Relaxed);

        arena.end.signal();
    }
}
