use cfg_if::cfg_if;
use thiserror::Error;

/// Failure to pin the calling thread to a CPU.
///
/// Pinning is an experimental control, not a correctness requirement, so
/// callers are expected to warn and keep running unpinned.
#[derive(Debug, Error)]
pub enum AffinityError {
    #[error("thread affinity is not supported on this platform")]
    Unsupported,
    #[error("setting thread affinity failed: {0}")]
    Os(#[source] std::io::Error),
}

/// Pins the calling thread to `cpu`.
///
/// Running both workers on one core serializes them at the hardware level:
/// store-buffer reordering disappears while compiler reordering survives,
/// which is how you tell the two layers apart.
#[inline]
pub fn pin_current_thread(cpu: usize) -> Result<(), AffinityError> {
    pin_current_thread_impl(cpu)
}

/// Whether this platform can pin threads at all.
#[inline]
pub fn pinning_supported() -> bool {
    PINNING_SUPPORTED
}

cfg_if! {
// ============================================================================
// 1. Linux Real Implementation (Direct libc)
// 1. Linux 真实实现 (直接使用 libc)
// ============================================================================
    if #[cfg(target_os = "linux")] {
        use libc::{CPU_SET, CPU_ZERO, cpu_set_t, sched_setaffinity};

        pub(crate) const PINNING_SUPPORTED: bool = true;

        fn pin_current_thread_impl(cpu: usize) -> Result<(), AffinityError> {
            // pid 0 targets the calling thread, not the process.
            // pid 0 作用于调用线程本身，而不是整个进程。
            let mut set: cpu_set_t = unsafe { std::mem::zeroed() };
            unsafe {
                CPU_ZERO(&mut set);
                CPU_SET(cpu, &mut set);
            }
            let rc = unsafe { sched_setaffinity(0, size_of::<cpu_set_t>(), &set) };
            if rc == 0 {
                Ok(())
            } else {
                Err(AffinityError::Os(std::io::Error::last_os_error()))
            }
        }
    }

// ============================================================================
// 2. Windows Real Implementation
// 2. Windows 真实实现
// ============================================================================
    else if #[cfg(target_os = "windows")] {
        use windows_sys::Win32::System::Threading::{GetCurrentThread, SetThreadAffinityMask};

        pub(crate) const PINNING_SUPPORTED: bool = true;

        fn pin_current_thread_impl(cpu: usize) -> Result<(), AffinityError> {
            // Returns the previous mask, or 0 on failure.
            // 返回旧的亲和掩码，失败时返回 0。
            let previous = unsafe { SetThreadAffinityMask(GetCurrentThread(), 1usize << cpu) };
            if previous != 0 {
                Ok(())
            } else {
                Err(AffinityError::Os(std::io::Error::last_os_error()))
            }
        }
    }

// ============================================================================
// 3. Other Platforms / Fallback
// 3. 其他平台 / Fallback
// ============================================================================
    else {
        pub(crate) const PINNING_SUPPORTED: bool = false;

        fn pin_current_thread_impl(_cpu: usize) -> Result<(), AffinityError> {
            // macOS only offers advisory affinity hints, and most of the
            // remaining targets offer nothing. Callers degrade to unpinned.
            //
            // macOS 只有建议性的亲和提示，其余平台大多什么都没有。
            // 调用方退化为不绑核运行。
            Err(AffinityError::Unsupported)
        }
    }
}
