//! **reorder-probe**
//!
//! Races two threads through a minimal store-then-load transaction and
//! counts the outcomes that are only possible if a memory operation was
//! reordered relative to program order.
//!
//! Each trial, both workers start from flags `X = Y = 0`. Worker one runs
//! `X = 1; <barrier>; r1 = Y` while worker two runs `Y = 1; <barrier>;
//! r2 = X`. In any interleaving that preserves program order at least one
//! worker must observe the other's store, so `r1 == 0 && r2 == 0` is direct
//! evidence that a store was delayed past a load, either by the CPU's store
//! buffer or by the compiler when no barrier is in place.
//!
//! ---
//!
//! 每轮实验中两个工作线程从 `X = Y = 0` 出发，一个执行
//! `X = 1; <屏障>; r1 = Y`，另一个执行 `Y = 1; <屏障>; r2 = X`。
//! 只要程序顺序被保留，至少有一方必然看到对方的写入，因此
//! `r1 == 0 && r2 == 0` 就是发生了重排的直接证据。

mod delay;
mod fence;
mod sema;
mod sync;

#[cfg(not(feature = "loom"))]
mod probe;
#[cfg(not(feature = "loom"))]
mod sys;

pub use delay::DelaySource;
pub use fence::Fence;
pub use sema::SpinSemaphore;

#[cfg(not(feature = "loom"))]
pub use probe::{Config, Probe};
#[cfg(not(feature = "loom"))]
pub use sys::{AffinityError, pin_current_thread, pinning_supported};
