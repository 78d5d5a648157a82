//! x86_64 SSE2 lane group.
//!
//! SSE2 is available on all x86_64 CPUs, holding 2 f64 values per register.

use std::arch::x86_64::*;

use super::lanes::{sum_lanes, LaneGroup};

/// Two `f64` lanes in an `__m128d`.
#[derive(Clone, Copy, Debug)]
pub struct F64x2(__m128d);

impl LaneGroup for F64x2 {
    type Elem = f64;
    const LANES: usize = 2;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { F64x2(_mm_setzero_pd()) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        F64x2(_mm_loadu_pd(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self {
        F64x2(_mm_load_pd(ptr))
    }

    #[inline(always)]
    fn add_product(self, x: Self, y: Self) -> Self {
        unsafe { F64x2(_mm_add_pd(self.0, _mm_mul_pd(x.0, y.0))) }
    }

    #[inline(always)]
    fn combine(self, other: Self) -> Self {
        unsafe { F64x2(_mm_add_pd(self.0, other.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        let mut lanes = [0.0f64; 2];
        unsafe { _mm_storeu_pd(lanes.as_mut_ptr(), self.0) };
        sum_lanes(&lanes)
    }
}
