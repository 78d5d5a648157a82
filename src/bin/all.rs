//! Generic CLI for running the benchmarks.
//!
//! Usage:
//!   micro-blas              # Run all algorithms
//!   micro-blas --list       # List available algorithms
//!   micro-blas ddotv        # Run specific algorithm
//!   micro-blas --verify     # Check every variant against its reference
//!   micro-blas --help       # Show help

use log::{error, info};
use micro_blas_core::registry::{build_registry, AlgorithmRunner};
use micro_blas_core::tui;
use micro_blas_core::utils::bench::time_seed;
use micro_blas_core::utils::runner::{export_csv, ResultRow};
use micro_blas_core::utils::timer::{PinStrategy, TimingConfig};
use std::env;
use std::process;

fn parse_pin(value: &str) -> Option<PinStrategy> {
    match value {
        "global" => Some(PinStrategy::Global),
        "per-exec" => Some(PinStrategy::PerExecution),
        "off" => Some(PinStrategy::Off),
        _ => None,
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let registry = build_registry();

    // Parse arguments
    let mut show_list = false;
    let mut show_help = false;
    let mut verify_only = false;
    let mut sample_sizes: Vec<usize> = vec![9, 64, 1024, 16384];
    let mut config = TimingConfig::default();
    let mut seed: Option<u64> = None;
    let mut csv_path: Option<String> = None;
    let mut algorithm_filter: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--list" | "-l" => show_list = true,
            "--help" | "-h" => show_help = true,
            "--verify" => verify_only = true,
            "--sizes" => {
                sample_sizes = next_value(&args, &mut i, "--sizes")
                    .split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect();
            }
            "--runs" | "-r" => {
                config.runs_per_variant = next_value(&args, &mut i, "--runs").parse().unwrap_or(30);
            }
            "--warmup" => {
                config.warmup_iterations = next_value(&args, &mut i, "--warmup").parse().unwrap_or(10);
            }
            "--seed" => {
                seed = next_value(&args, &mut i, "--seed").parse().ok();
            }
            "--pin" => {
                let value = next_value(&args, &mut i, "--pin");
                config.pin_strategy = parse_pin(value).unwrap_or_else(|| {
                    eprintln!("Unknown pin mode: {} (expected global, per-exec or off)", value);
                    process::exit(1);
                });
            }
            "--csv" => {
                csv_path = Some(next_value(&args, &mut i, "--csv").to_string());
            }
            arg if !arg.starts_with('-') => {
                algorithm_filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if show_help {
        tui::print_help();
        return;
    }

    if show_list {
        tui::print_available_algorithms(&registry);
        return;
    }

    let selected: Vec<&dyn AlgorithmRunner> = match &algorithm_filter {
        Some(name) => match registry.find(name) {
            Some(algo) => vec![algo],
            None => {
                eprintln!("Algorithm '{}' not found.", name);
                eprintln!("Available: {:?}", registry.list_names());
                process::exit(1);
            }
        },
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    if verify_only {
        let mut failed = false;
        for (name, outcome) in registry.verify_all(algorithm_filter.as_deref()) {
            match outcome {
                Ok(()) => println!("  ✅ {} passed verification", name),
                Err(e) => {
                    println!("  ❌ {} failed verification: {}", name, e);
                    failed = true;
                }
            }
        }
        if failed {
            process::exit(1);
        }
        return;
    }

    let seed = seed.unwrap_or_else(time_seed);
    config.order_seed = Some(seed);
    info!("input and order seed: {}", seed);

    tui::print_header();

    let mut collected = Vec::new();
    for algo in &selected {
        for (size, results) in tui::run_and_display(*algo, &sample_sizes, &config, seed) {
            collected.push((algo.name(), size, results));
        }
    }

    if let Some(path) = csv_path {
        let rows: Vec<ResultRow<'_>> = collected
            .iter()
            .flat_map(|(name, size, results)| {
                results.iter().map(move |result| ResultRow {
                    algo_name: name,
                    input_size: *size,
                    result,
                })
            })
            .collect();

        match export_csv(&path, &rows) {
            Ok(()) => println!("Results written to {}", path),
            Err(e) => {
                error!("failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
    }

    println!("Note: Speedup is relative to the 'original' variant.");
}
