use crate::sync::{AtomicU32, Ordering, yield_now};

/// **Spin Semaphore**
///
/// A counting semaphore built directly on one atomic, with no OS blocking
/// primitive. Wait durations in the harness are microseconds, so spinning
/// with a scheduler yield beats paying a futex round trip that could mask
/// the very races being measured.
///
/// * `signal` is the release side: every write the signaler made before it
///   is visible to whichever thread consumes the permit.
/// * `wait` is the acquire side: it returns only after winning a CAS
///   decrement from a positive count.
///
/// ---
///
/// **自旋信号量**
///
/// 直接建立在单个原子计数上，不使用任何 OS 阻塞原语。等待时间是微秒级，
/// 自旋加让出调度比 futex 往返更合适，后者的系统调用延迟会掩盖被测的竞争。
pub struct SpinSemaphore {
    count: AtomicU32,
}

impl SpinSemaphore {
    pub fn new(permits: u32) -> Self {
        Self {
            count: AtomicU32::new(permits),
        }
    }

    /// Adds one permit. Release ordering publishes all preceding writes of
    /// the caller to the thread whose `wait` consumes this permit.
    pub fn signal(&self) {
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Takes one permit, spinning until one is available.
    ///
    /// Acquire ordering on the successful decrement pairs with the matching
    /// `signal`; anything weaker would reintroduce exactly the class of bug
    /// this harness exists to expose. The failure ordering is relaxed: a
    /// failed CAS synchronizes with nothing and the loop simply retries.
    ///
    /// Blocks forever if never signaled. There is deliberately no timeout
    /// and no cancellation; the controller owns thread lifetime.
    pub fn wait(&self) {
        loop {
            let current = self.count.load(Ordering::Relaxed);
            if current > 0
                && self
                    .count
                    .compare_exchange(current, current - 1, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
            {
                return;
            }
            yield_now();
        }
    }
}
