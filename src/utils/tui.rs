//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use crate::registry::{AlgorithmRegistry, AlgorithmRunner, BenchmarkResult};
use crate::utils::bench::format_measurement;
use crate::utils::timer::{measure_variants, TimingConfig};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Sort key: original first, then Rust variants, then C variants
fn variant_sort_key(result: &BenchmarkResult) -> (u8, String) {
    let name = result.name.to_lowercase();
    if name == "original" {
        (0, String::new())
    } else if name.starts_with("c-") {
        (2, name)
    } else {
        (1, name)
    }
}

pub fn sort_variants(results: &mut [BenchmarkResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants:  {}", algo.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print results table for a single size
pub fn print_results_table(results: &[BenchmarkResult], size: usize, runs: usize) {
    if results.is_empty() {
        return;
    }

    let variant_col_width = get_term_width().saturating_sub(72).max(15);
    let table_width = variant_col_width + 64 + 6;

    let baseline_time = results
        .first()
        .map(|r| r.avg_time.as_nanos() as f64)
        .unwrap_or(1.0);
    let baseline_result = results.first().and_then(|r| r.result_sample);

    println!("  Size: {} ({} runs)", size, runs);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let avg = result.avg_time.as_nanos() as f64;
        let speedup = if avg > 0.0 { baseline_time / avg } else { 0.0 };
        let cv = if avg > 0.0 {
            result.std_dev.as_nanos() as f64 / avg
        } else {
            0.0
        };

        let relative_error = match (result.result_sample, baseline_result) {
            (Some(res), Some(base)) => {
                let diff = (res - base).abs();
                if base.abs() > 1e-9 {
                    diff / base.abs()
                } else {
                    diff
                }
            }
            _ => 0.0,
        };

        let display_name = match (result.name.starts_with("c-"), crate::utils::C_COMPILER_NAME) {
            (true, Some(c)) => format!("{} ({})", result.name, c),
            _ => result.name.clone(),
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10.2e}",
            truncate(&display_name, variant_col_width),
            format_measurement(result.avg_time),
            format_measurement(result.min_time),
            format_measurement(result.max_time),
            speedup,
            cv * 100.0,
            relative_error,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Measure one algorithm over every size and print the tables.
///
/// Returns the sorted results per size for CSV export.
pub fn run_and_display(
    algo: &dyn AlgorithmRunner,
    sizes: &[usize],
    config: &TimingConfig,
    seed: u64,
) -> Vec<(usize, Vec<BenchmarkResult>)> {
    print_algo_info_box(algo);

    sizes
        .iter()
        .map(|&size| {
            let mut results = measure_variants(algo.variants(size, seed), config);
            sort_variants(&mut results);
            print_results_table(&results, size, config.runs_per_variant);
            (size, results)
        })
        .collect()
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Micro-BLAS Core Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: micro-blas [OPTIONS] [ALGORITHM]");
    println!();
    println!("Options:");
    println!("  --list, -l       List all available algorithms");
    println!("  --help, -h       Show this help message");
    println!("  --sizes SIZES    Comma-separated input sizes (default: 9,64,1024,16384)");
    println!("  --runs N, -r N   Measured runs per variant (default: 30)");
    println!("  --warmup N       Warmup runs per variant (default: 10)");
    println!("  --seed N         Random seed for inputs and run order (default: time-based)");
    println!("  --pin MODE       CPU pinning: global, per-exec, off (default: per-exec)");
    println!("  --csv PATH       Export results to CSV");
    println!("  --verify         Verify every variant against its reference and exit");
    println!();
    println!("Arguments:");
    println!("  ALGORITHM        Name of specific algorithm to run (omit for all)");
    println!();
    println!("Logging goes through RUST_LOG (e.g. RUST_LOG=debug).");
    println!();
    println!("Examples:");
    println!("  micro-blas                      # Run all algorithms");
    println!("  micro-blas ddotv                # Run only ddotv");
    println!("  micro-blas --sizes 9,1023       # Odd sizes exercise prologue and remainder");
    println!("  micro-blas --seed 12345         # Reproducible run");
    println!("  micro-blas --csv data.csv       # Export results to CSV");
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
    }
}
