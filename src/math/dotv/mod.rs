//! # Dotv: vectorized inner product
//!
//! Computes the inner product of two strided vectors:
//!
//! `rho = Σ conj(x[i]) * conj(y[i])`
//!
//! ## Strategy selection
//!
//! 1. `n == 0` returns zero.
//! 2. Any non-unit stride goes to the reference kernel.
//! 3. Aligned-load strategies check both operands against the register
//!    boundary. A shared one-element offset is fixed by a scalar prologue,
//!    mixed alignment goes to the reference kernel.
//! 4. The vector loop runs `U` independent lane-group accumulators, folds
//!    them and reduces the lanes horizontally.
//! 5. Leftover elements are added one at a time.
//!
//! Vector results equal the reference only up to rounding: lane groups sum
//! in parallel, never strictly left to right.

pub mod bench;
pub mod code;
pub mod test;

pub use code::*;

use log::debug;
use rand::Rng;

use crate::registry::AlgorithmRunner;
use crate::utils::timer::Variant;
use crate::utils::VariantInfo;

const VERIFY_SIZES: [usize; 6] = [0, 1, 7, 9, 17, 1023];

/// Check every variant against `original` on odd lengths and both alignment classes.
///
/// Each input pair holds one spare element so the operands can be shifted by
/// one element.
fn verify_variants<T, F>(
    variants: &[VariantInfo<F>],
    tolerance: f64,
    inputs: &[(Vec<T>, Vec<T>)],
) -> Result<(), String>
where
    T: DotvElement,
    F: Fn(&[T], &[T]) -> T,
{
    let original = variants
        .iter()
        .find(|v| v.name == "original")
        .ok_or("No 'original' variant found for reference")?;

    for (x, y) in inputs {
        let size = x.len().min(y.len()).saturating_sub(1);
        for (xo, yo) in [(0, 0), (1, 1), (0, 1), (1, 0)] {
            let (xs, ys) = (&x[xo..xo + size], &y[yo..yo + size]);
            let expected = (original.function)(xs, ys);
            let scale = xs
                .iter()
                .zip(ys)
                .map(|(a, b)| (*a * *b).abs().to_f64().unwrap_or(0.0))
                .sum::<f64>()
                .max(1.0);

            for variant in variants.iter().filter(|v| v.name != "original") {
                let result = (variant.function)(xs, ys);
                let diff = (result - expected).abs().to_f64().unwrap_or(f64::INFINITY);
                if diff > tolerance * scale {
                    return Err(format!(
                        "Variant '{}' failed verification (n={}, offsets=({}, {})). Expected {:?}, got {:?}, diff {}",
                        variant.name, size, xo, yo, expected, result, diff
                    ));
                }
            }
        }
        debug!("{}dotv variants agree at n={}", T::NAME, size);
    }

    Ok(())
}

/// Runner for the double-precision kernel
pub struct DdotvRunner;

impl AlgorithmRunner for DdotvRunner {
    fn name(&self) -> &'static str {
        "ddotv"
    }

    fn description(&self) -> &'static str {
        "Double-precision inner product of two vectors"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::ddotv_variants().iter().map(|v| v.name).collect()
    }

    fn variants(&self, size: usize, seed: u64) -> Vec<Variant<'_>> {
        bench::ddotv_closures(size, seed)
    }

    fn verify(&self) -> Result<(), String> {
        let mut rng = rand::rng();
        let inputs: Vec<(Vec<f64>, Vec<f64>)> = VERIFY_SIZES
            .iter()
            .map(|&n| {
                let x = (0..=n).map(|_| rng.random_range(-1.0..1.0)).collect();
                let y = (0..=n).map(|_| rng.random_range(-1.0..1.0)).collect();
                (x, y)
            })
            .collect();
        verify_variants(&code::ddotv_variants(), 1e-12, &inputs)
    }
}

/// Runner for the single-precision kernel
pub struct SdotvRunner;

impl AlgorithmRunner for SdotvRunner {
    fn name(&self) -> &'static str {
        "sdotv"
    }

    fn description(&self) -> &'static str {
        "Single-precision inner product of two vectors"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::sdotv_variants().iter().map(|v| v.name).collect()
    }

    fn variants(&self, size: usize, seed: u64) -> Vec<Variant<'_>> {
        bench::sdotv_closures(size, seed)
    }

    fn verify(&self) -> Result<(), String> {
        let mut rng = rand::rng();
        let inputs: Vec<(Vec<f32>, Vec<f32>)> = VERIFY_SIZES
            .iter()
            .map(|&n| {
                let x = (0..=n).map(|_| rng.random_range(-1.0..1.0)).collect();
                let y = (0..=n).map(|_| rng.random_range(-1.0..1.0)).collect();
                (x, y)
            })
            .collect();
        verify_variants(&code::sdotv_variants(), 1e-5, &inputs)
    }
}
