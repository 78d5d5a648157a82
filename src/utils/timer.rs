//! Timing layer for micro-benchmarks.
//!
//! - Cycles or wall-clock time (via features)
//! - CPU pinning around measurements
//! - Randomized variant order to avoid ordering bias

use std::hint::black_box;
use std::time::Duration;

use log::debug;

use super::bench::{shuffle, time_seed, to_nanos, Measurement};
use super::cpu_affinity::CpuPinGuard;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin/unpin around each execution
    #[default]
    PerExecution,
    /// Never pin
    Off,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup runs before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Seed for the execution order; time-based when `None`
    pub order_seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            order_seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// One execution: returns (measurement, optional result value).
    /// Timing happens inside the closure so the call overhead stays out.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    /// Average measurement (display units stored as a Duration)
    pub avg_time: Duration,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of measured runs
    pub runs: usize,
    /// Sample result value, used to report relative error against the baseline
    pub result_sample: Option<f64>,
}

/// Measure multiple variants with randomized execution order.
///
/// Warms every variant up, shuffles a (variant, sample) schedule, then runs
/// it under the configured pinning strategy.
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;
    debug!(
        "measuring {} variants, {} samples each, pin={:?}",
        variants.len(),
        samples,
        config.pin_strategy
    );

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    shuffle(&mut tasks, config.order_seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _pin = (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed, result) = (variant.run)();

        measurements[variant_idx].push(elapsed);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            summarize(
                variant.name,
                variant.description,
                &measurements[idx],
                result_samples[idx],
            )
        })
        .collect()
}

/// Compute statistics from raw measurements
fn summarize(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    result_sample: Option<f64>,
) -> VariantResult {
    let mut units: Vec<u64> = measurements.iter().map(|m| to_nanos(*m)).collect();
    units.sort_unstable();

    let (avg, median, min, max, std_dev) = if units.is_empty() {
        (0, 0, 0, 0, 0)
    } else {
        let mean = units.iter().sum::<u64>() as f64 / units.len() as f64;
        let variance = units
            .iter()
            .map(|&u| {
                let diff = u as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / (units.len() - 1).max(1) as f64;
        (
            mean as u64,
            units[units.len() / 2],
            units[0],
            units[units.len() - 1],
            variance.sqrt() as u64,
        )
    };

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg),
        median_time: Duration::from_nanos(median),
        min_time: Duration::from_nanos(min),
        max_time: Duration::from_nanos(max),
        std_dev: Duration::from_nanos(std_dev),
        runs: units.len(),
        result_sample,
    }
}
