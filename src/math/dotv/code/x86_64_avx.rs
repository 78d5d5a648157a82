//! x86_64 AVX lane groups.
//!
//! Compiled only when the target enables AVX, holding 4 f64 or 8 f32 values
//! per 256-bit register.

use std::arch::x86_64::*;

use super::lanes::{sum_lanes, LaneGroup};

/// Four `f64` lanes in an `__m256d`.
#[derive(Clone, Copy, Debug)]
pub struct F64x4(__m256d);

impl LaneGroup for F64x4 {
    type Elem = f64;
    const LANES: usize = 4;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { F64x4(_mm256_setzero_pd()) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        F64x4(_mm256_loadu_pd(ptr))
    }

    #[inline(always)]
    fn add_product(self, x: Self, y: Self) -> Self {
        // Separate mul and add, never _mm256_fmadd_pd.
        unsafe { F64x4(_mm256_add_pd(self.0, _mm256_mul_pd(x.0, y.0))) }
    }

    #[inline(always)]
    fn combine(self, other: Self) -> Self {
        unsafe { F64x4(_mm256_add_pd(self.0, other.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        let mut lanes = [0.0f64; 4];
        unsafe { _mm256_storeu_pd(lanes.as_mut_ptr(), self.0) };
        sum_lanes(&lanes)
    }
}

/// Eight `f32` lanes in an `__m256`.
#[derive(Clone, Copy, Debug)]
pub struct F32x8(__m256);

impl LaneGroup for F32x8 {
    type Elem = f32;
    const LANES: usize = 8;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { F32x8(_mm256_setzero_ps()) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        F32x8(_mm256_loadu_ps(ptr))
    }

    #[inline(always)]
    fn add_product(self, x: Self, y: Self) -> Self {
        unsafe { F32x8(_mm256_add_ps(self.0, _mm256_mul_ps(x.0, y.0))) }
    }

    #[inline(always)]
    fn combine(self, other: Self) -> Self {
        unsafe { F32x8(_mm256_add_ps(self.0, other.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        let mut lanes = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(lanes.as_mut_ptr(), self.0) };
        sum_lanes(&lanes)
    }
}
