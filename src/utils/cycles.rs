//! CPU cycle counter for precise micro-benchmarking.

/// Read the current CPU cycle counter / timer.
///
/// On x86_64: RDTSC fenced with LFENCE on both sides.
/// On aarch64: CNTVCT_EL0 (virtual timer, readable from userspace).
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // Fixed-frequency timer, not core cycles, but consistent across cores
        let val: u64;
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86_64 or aarch64; build with --features use_time");
    }
}
