//! CSV export of benchmark results.

use std::io::Write;

use super::timer::VariantResult;

/// One result row tagged with its algorithm and input size
pub struct ResultRow<'a> {
    pub algo_name: &'a str,
    pub input_size: usize,
    pub result: &'a VariantResult,
}

/// Write results as CSV to any writer
pub fn write_csv<W: Write>(out: &mut W, rows: &[ResultRow<'_>]) -> std::io::Result<()> {
    writeln!(
        out,
        "algorithm,variant,compiler,input_size,avg,median,min,max,unit,result"
    )?;

    for row in rows {
        let compiler = if row.result.name.starts_with("c-") {
            crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
        } else {
            ""
        };

        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            row.algo_name,
            row.result.name,
            compiler,
            row.input_size,
            row.result.avg_time.as_nanos(),
            row.result.median_time.as_nanos(),
            row.result.min_time.as_nanos(),
            row.result.max_time.as_nanos(),
            crate::utils::bench::unit_name(),
            row.result
                .result_sample
                .map(|v| v.to_string())
                .unwrap_or_default()
        )?;
    }

    Ok(())
}

/// Export results to a CSV file
pub fn export_csv(path: &str, rows: &[ResultRow<'_>]) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_csv(&mut file, rows)?;
    file.flush()
}
