//! Dotv implementations.
//!
//! This module contains the reference kernel, the lane groups, the strategy
//! planner and the vectorized kernels built on them.

pub mod c_impl;
mod error;
mod kernel;
mod lanes;
mod original;
mod plan;
mod types;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
mod x86_64_avx;

pub use c_impl::{ddotv_c_original, sdotv_c_original, C_IMPL_AVAILABLE};
pub use error::{DotvError, Operand};
pub use kernel::{ddotv, ddotv_with, dotv, sdotv, sdotv_plan, try_dotv, DdotvStrategy};
pub use lanes::{accumulate, Double2, Double4, LaneGroup, Lanes, Single8};
pub use original::dotv_reference;
pub use plan::{misalignment, plan, DotvPlan};
pub use types::{required_len, strided_index, Conj, DotvElement};

pub(crate) use kernel::run;

use crate::utils::VariantInfo;

/// Unit-stride dotv signature used by the variant tables
pub type DdotvFn = fn(&[f64], &[f64]) -> f64;
pub type SdotvFn = fn(&[f32], &[f32]) -> f32;

const NC: Conj = Conj::NoConjugate;

fn ddotv_original(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    dotv_reference(NC, NC, x.len(), x, 1, y, 1)
}

fn ddotv_lanes2x4(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    ddotv_with(DdotvStrategy::Lanes2x4, NC, NC, x.len(), x, 1, y, 1)
}

fn ddotv_lanes4x2(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    ddotv_with(DdotvStrategy::Lanes4x2, NC, NC, x.len(), x, 1, y, 1)
}

#[cfg(target_arch = "x86_64")]
fn ddotv_portable_lanes2x4(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    run::<Lanes<f64, 2>, 4, true>(NC, NC, x.len(), x, 1, y, 1)
}

fn sdotv_original(x: &[f32], y: &[f32]) -> f32 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    dotv_reference(NC, NC, x.len(), x, 1, y, 1)
}

fn sdotv_lanes8x1(x: &[f32], y: &[f32]) -> f32 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    sdotv(NC, NC, x.len(), x, 1, y, 1)
}

/// Get all available double-precision variants for the current build
pub fn ddotv_variants() -> Vec<VariantInfo<DdotvFn>> {
    let mut variants: Vec<VariantInfo<DdotvFn>> = vec![
        VariantInfo {
            name: "original",
            description: "Strided reference kernel, strict index order",
            function: ddotv_original,
        },
        VariantInfo {
            name: "lanes2x4",
            description: "128-bit lanes, 4x unrolled, aligned loads with prologue",
            function: ddotv_lanes2x4,
        },
        VariantInfo {
            name: "lanes4x2",
            description: "256-bit lanes, 2x unrolled, unaligned loads",
            function: ddotv_lanes4x2,
        },
    ];

    #[cfg(target_arch = "x86_64")]
    variants.push(VariantInfo {
        name: "portable-lanes2x4",
        description: "Array-backed lanes with the lanes2x4 summation order",
        function: ddotv_portable_lanes2x4,
    });

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-original",
            description: "C reference implementation",
            function: ddotv_c_original,
        });
    }

    variants
}

/// Get all available single-precision variants for the current build
pub fn sdotv_variants() -> Vec<VariantInfo<SdotvFn>> {
    let mut variants: Vec<VariantInfo<SdotvFn>> = vec![
        VariantInfo {
            name: "original",
            description: "Strided reference kernel, strict index order",
            function: sdotv_original,
        },
        VariantInfo {
            name: "lanes8x1",
            description: "256-bit lanes, no unrolling, unaligned loads",
            function: sdotv_lanes8x1,
        },
    ];

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-original",
            description: "C reference implementation",
            function: sdotv_c_original,
        });
    }

    variants
}
