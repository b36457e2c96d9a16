use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// A seedable stream of well-mixed 32-bit values used only to inject
/// randomized busy-wait delays, so the two workers' critical sections
/// overlap differently on every trial.
///
/// Each worker owns its own instance with a distinct seed; state is never
/// shared across threads. The same seed always reproduces the same
/// sequence, which is what makes the timing logic unit-testable.
pub struct DelaySource {
    rng: SmallRng,
}

impl DelaySource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws the next value.
    ///
    /// `#[inline(never)]` plus `black_box` keep every call an observable
    /// runtime event: the delay loop below is only a delay if the optimizer
    /// can neither hoist the draw out of the loop nor collapse the loop to
    /// its exit condition.
    #[inline(never)]
    pub fn next(&mut self) -> u32 {
        std::hint::black_box(self.rng.next_u32())
    }

    /// Spins for an unbounded but typically short number of draws: the loop
    /// runs while `next() & mask != 0`, so `mask = 7` exits with probability
    /// 1/8 per draw and `mask = 0` is no delay at all.
    ///
    /// The mask is a tuning knob, not a contract; platforms with very
    /// different core counts or clock speeds may want a different value to
    /// reach comparable detection rates.
    pub fn jitter(&mut self, mask: u32) {
        while self.next() & mask != 0 {}
    }
}
