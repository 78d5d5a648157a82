//! Benchmark closures for the partition variants.

use std::sync::Arc;

use super::code::{available_variants, ThreadInfo};
use crate::measure;
use crate::utils::bench::SeededRng;
use crate::utils::timer::Variant;

/// Group width used for benchmarking
pub const BENCH_N_WAY: usize = 4;

/// Descriptor of a seeded rank in a group of [`BENCH_N_WAY`]
pub fn bench_thread(seed: u64) -> ThreadInfo {
    let mut rng = SeededRng::new(seed);
    let work_id = (rng.next_u64() % BENCH_N_WAY as u64) as usize;
    ThreadInfo::new(work_id, BENCH_N_WAY).unwrap_or_default()
}

pub fn partition_closures(size: usize, seed: u64) -> Vec<Variant<'static>> {
    let thread = Arc::new(bench_thread(seed));

    available_variants()
        .into_iter()
        .map(|v| {
            let thread = Arc::clone(&thread);
            let func = v.function;
            Variant {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, sum) = measure!(func(size, &thread));
                    (elapsed, Some(sum as f64))
                }),
            }
        })
        .collect()
}
