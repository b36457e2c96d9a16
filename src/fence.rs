use cfg_if::cfg_if;
use std::fmt;
use std::str::FromStr;

/// Barrier strength applied between a worker's store and its load.
///
/// This is the experiment's main dial. A single build can be swept across
/// all three strengths instead of recompiling with conditional code paths.
///
/// * `None`: nothing at all; both the compiler and the CPU may reorder.
/// * `Compiler`: forbids the compiler from moving the load before the
///   store, but emits no instruction; the CPU's store buffer still can.
/// * `Full`: a full hardware fence (`mfence`-class); drives detections to
///   zero on every platform we know of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    None,
    Compiler,
    Full,
}

impl Fence {
    #[inline]
    pub fn apply(self) {
        match self {
            Fence::None => {}
            Fence::Compiler => compiler_only(),
            Fence::Full => full(),
        }
    }
}

impl FromStr for Fence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Fence::None),
            "compiler" => Ok(Fence::Compiler),
            "full" => Ok(Fence::Full),
            other => Err(format!(
                "unknown fence strength `{other}` (expected none, compiler or full)"
            )),
        }
    }
}

impl fmt::Display for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fence::None => "none",
            Fence::Compiler => "compiler",
            Fence::Full => "full",
        })
    }
}

cfg_if! {
    if #[cfg(feature = "loom")] {
        // Loom has no notion of a compiler-only barrier; both strengths
        // must become a real modeled fence or loom will not see any
        // synchronization at this point.
        //
        // Loom 没有"仅编译器屏障"的概念；两档都必须换成真正建模的
        // fence，否则 loom 会认为这里不存在同步关系。
        #[inline]
        fn full() {
            loom::sync::atomic::fence(loom::sync::atomic::Ordering::SeqCst);
        }

        #[inline]
        fn compiler_only() {
            loom::sync::atomic::fence(loom::sync::atomic::Ordering::SeqCst);
        }
    } else {
        use std::sync::atomic::{Ordering, compiler_fence, fence};

        #[inline]
        fn full() {
            fence(Ordering::SeqCst);
        }

        #[inline]
        fn compiler_only() {
            compiler_fence(Ordering::SeqCst);
        }
    }
}
