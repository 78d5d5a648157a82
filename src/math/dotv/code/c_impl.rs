//! FFI bindings for the C reference kernels.

#[cfg(c_implementation_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::{c_double, c_float};

    extern "C" {
        pub fn ddotv_c_original(x: *const c_double, y: *const c_double, n: size_t) -> c_double;
        pub fn sdotv_c_original(x: *const c_float, y: *const c_float, n: size_t) -> c_float;
    }
}

/// C double-precision reference wrapper
#[cfg(c_implementation_active)]
pub fn ddotv_c_original(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    unsafe { ffi::ddotv_c_original(x.as_ptr(), y.as_ptr(), x.len()) }
}

/// C single-precision reference wrapper
#[cfg(c_implementation_active)]
pub fn sdotv_c_original(x: &[f32], y: &[f32]) -> f32 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    unsafe { ffi::sdotv_c_original(x.as_ptr(), y.as_ptr(), x.len()) }
}

/// Check if C implementations are available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

// Stubs for builds without a usable C compiler; never listed as variants.
#[cfg(not(c_implementation_active))]
pub fn ddotv_c_original(_x: &[f64], _y: &[f64]) -> f64 {
    panic!("C implementation not compiled (requires GCC, MSVC, or Apple Clang)")
}

#[cfg(not(c_implementation_active))]
pub fn sdotv_c_original(_x: &[f32], _y: &[f32]) -> f32 {
    panic!("C implementation not compiled (requires GCC, MSVC, or Apple Clang)")
}
