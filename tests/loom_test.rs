#[cfg(feature = "loom")]
use loom::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "loom")]
use loom::thread;
#[cfg(feature = "loom")]
use reorder_probe::SpinSemaphore;
#[cfg(feature = "loom")]
use std::sync::Arc;

/// The release in `signal` must pair with the acquire in `wait`: a relaxed
/// store made before signaling is visible after the matching wait returns.
///
/// This is the property the whole handshake leans on. The controller only
/// reads the result cells after consuming both end signals, and the workers
/// only see the flag reset because it precedes the begin signals.
#[test]
#[cfg(feature = "loom")]
fn test_signal_publishes_prior_writes() {
    loom::model(|| {
        let sema = Arc::new(SpinSemaphore::new(0));
        let data = Arc::new(AtomicUsize::new(0));

        let sema1 = sema.clone();
        let data1 = data.clone();

        thread::spawn(move || {
            data1.store(1, Ordering::Relaxed);
            sema1.signal();
        });

        sema.wait();

        // If the acquire/release pairing were any weaker, loom would find
        // an execution where this still reads 0.
        assert_eq!(data.load(Ordering::Relaxed), 1, "wait returned before the signaler's write was visible");
    });
}

/// Two signals wake exactly two waiters: no permit is lost and none is
/// duplicated, whatever the interleaving of the CAS loops.
#[test]
#[cfg(feature = "loom")]
fn test_two_signals_wake_two_waiters() {
    loom::model(|| {
        let sema = Arc::new(SpinSemaphore::new(0));
        let woken = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let sema = sema.clone();
                let woken = woken.clone();
                thread::spawn(move || {
                    sema.wait();
                    woken.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        sema.signal();
        sema.signal();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(woken.load(Ordering::SeqCst), 2);
    });
}
