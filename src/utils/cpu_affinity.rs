//! CPU affinity wrapper for thread pinning during measurements.
//!
//! Linux pins through `sched_setaffinity` (libc). Other platforms get a
//! no-op implementation and measurements simply run unpinned.

use log::debug;

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static ORIGINAL_AFFINITY: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn save_affinity() -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) != 0 {
                return false;
            }
            ORIGINAL_AFFINITY.with(|cell| *cell.borrow_mut() = Some(set));
            true
        }
    }

    pub fn set_affinity(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore_affinity() -> bool {
        ORIGINAL_AFFINITY.with(|cell| match cell.borrow_mut().take() {
            Some(set) => unsafe {
                libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
            },
            None => false,
        })
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn save_affinity() -> bool {
        false
    }

    pub fn set_affinity(_core_id: usize) -> bool {
        false
    }

    pub fn restore_affinity() -> bool {
        false
    }
}

/// Pin the calling thread to the core it is currently running on.
///
/// Returns the core id when pinning succeeded.
pub fn pin_to_current_core() -> Option<usize> {
    let core = platform::current_cpu()?;
    if !platform::save_affinity() {
        return None;
    }
    if platform::set_affinity(core) {
        Some(core)
    } else {
        debug!("could not pin thread to core {}", core);
        None
    }
}

/// Restore the affinity saved by [`pin_to_current_core`].
pub fn unpin() -> bool {
    platform::restore_affinity()
}

/// RAII guard: pins on creation, restores the original affinity on drop.
pub struct CpuPinGuard {
    core: Option<usize>,
}

impl CpuPinGuard {
    pub fn new() -> Self {
        Self {
            core: pin_to_current_core(),
        }
    }

    /// Core the thread is pinned to, if pinning succeeded
    pub fn core(&self) -> Option<usize> {
        self.core
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.core.is_some() {
            unpin();
        }
    }
}
