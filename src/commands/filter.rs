use crate::candidates::{candidate_file_path, filter_candidates};
use crate::config::FailurePolicy;
use crate::io::{read_method_rows, write_table};
use crate::records::{normalize_rows, NORMALIZED_COLUMNS};
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct FilterOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub source_marker: String,
    pub target_marker: String,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug)]
pub struct FilterSummary {
    /// `(rows, columns)` of the method list
    pub input_shape: (usize, usize),
    /// `(rows, columns)` of the candidate table
    pub output_shape: (usize, usize),
    pub output_path: PathBuf,
    pub skipped: usize,
}

/// Select instrumentation candidates from an extracted method list and write
/// them next to the configured output directory.
pub fn run_filter(options: &FilterOptions) -> Result<FilterSummary> {
    let (headers, rows) = read_method_rows(&options.input)
        .with_context(|| format!("Failed to read method list {}", options.input.display()))?;
    let input_shape = (rows.len(), headers.len());
    println!("input (rows, columns): {:?}", input_shape);

    let normalized = normalize_rows(&rows, options.failure_policy)?;
    let candidates = filter_candidates(&normalized.records);
    let output_shape = (candidates.len(), NORMALIZED_COLUMNS.len());
    println!("output (rows, columns): {:?}", output_shape);

    let output_path = candidate_file_path(
        &options.input,
        &options.output_dir,
        &options.source_marker,
        &options.target_marker,
    );
    write_table(
        &output_path,
        &NORMALIZED_COLUMNS[..],
        candidates.iter().map(|c| c.to_record()),
    )
    .with_context(|| format!("Failed to write candidates to {}", output_path.display()))?;

    super::print_skipped(&normalized.skipped);
    println!(
        "{} {}",
        "instrumentation candidates saved in".green(),
        output_path.display()
    );

    Ok(FilterSummary {
        input_shape,
        output_shape,
        output_path,
        skipped: normalized.skipped.len(),
    })
}
