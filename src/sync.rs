use cfg_if::cfg_if;

// Single switch point between the real primitives and loom's models.
// Everything that participates in the handshake imports from here so the
// loom suite exercises the exact code the real build runs.
//
// 真实原语与 loom 模型之间唯一的切换点。
// 参与握手的代码都从这里导入，loom 测试跑的就是真实构建的同一份代码。
cfg_if! {
    if #[cfg(feature = "loom")] {
        pub(crate) use loom::sync::atomic::{AtomicU32, Ordering};
        pub(crate) use loom::thread::yield_now;
    } else {
        pub(crate) use std::sync::atomic::{AtomicU32, Ordering};
        pub(crate) use std::thread::yield_now;
    }
}
