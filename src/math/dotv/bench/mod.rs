//! Benchmark closures for dotv.

use std::sync::Arc;

use super::code::{ddotv_variants, sdotv_variants};
use crate::measure;
use crate::utils::bench::SeededRng;
use crate::utils::timer::Variant;

/// Seeded `f64` operands of length `size`
pub fn f64_operands(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = SeededRng::new(seed);
    let x = (0..size).map(|_| rng.next_f64_range()).collect();
    let y = (0..size).map(|_| rng.next_f64_range()).collect();
    (x, y)
}

/// Seeded `f32` operands of length `size`
pub fn f32_operands(size: usize, seed: u64) -> (Vec<f32>, Vec<f32>) {
    let mut rng = SeededRng::new(seed);
    let x = (0..size).map(|_| rng.next_f32_range()).collect();
    let y = (0..size).map(|_| rng.next_f32_range()).collect();
    (x, y)
}

pub fn ddotv_closures(size: usize, seed: u64) -> Vec<Variant<'static>> {
    let (x, y) = f64_operands(size, seed);
    let (x, y) = (Arc::new(x), Arc::new(y));

    ddotv_variants()
        .into_iter()
        .map(|v| {
            let x = Arc::clone(&x);
            let y = Arc::clone(&y);
            let func = v.function;
            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, rho) = measure!(func(&x, &y));
                    (elapsed, Some(rho))
                }),
            }
        })
        .collect()
}

pub fn sdotv_closures(size: usize, seed: u64) -> Vec<Variant<'static>> {
    let (x, y) = f32_operands(size, seed);
    let (x, y) = (Arc::new(x), Arc::new(y));

    sdotv_variants()
        .into_iter()
        .map(|v| {
            let x = Arc::clone(&x);
            let y = Arc::clone(&y);
            let func = v.function;
            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, rho) = measure!(func(&x, &y));
                    (elapsed, Some(rho as f64))
                }),
            }
        })
        .collect()
}
