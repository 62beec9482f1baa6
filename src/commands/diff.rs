use crate::config::FailurePolicy;
use crate::diff::{diff_classifications, InvokedMethods, TransitionHistogram};
use crate::io::{read_table, write_table};
use crate::reports::{load_lookup, ReportSources};
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

pub struct DiffOptions {
    pub invoked_methods: PathBuf,
    pub sources: ReportSources,
    pub report_file_name: String,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug)]
pub struct DiffSummary {
    pub methods: usize,
    pub histogram: TransitionHistogram,
    pub report_conflicts: usize,
    pub skipped: usize,
}

/// Recompute the classification of every invoked method against freshly
/// generated reports and write the augmented table.
pub fn run_diff(options: &DiffOptions) -> Result<DiffSummary> {
    let table = read_table(&options.invoked_methods)?;
    let invoked = InvokedMethods::from_table(table, &options.invoked_methods)?;
    log::info!(
        "There are {} methods in the csv under analysis",
        invoked.len()
    );

    let lookup = load_lookup(&options.sources, &options.report_file_name)?;
    let outcome = diff_classifications(&invoked, &lookup, options.failure_policy)?;

    let result = outcome.to_table();
    write_table(&options.output, &result.headers[..], &result.rows)?;

    if let Some(path) = &options.summary_json {
        write_summary_json(path, &outcome.histogram)?;
    }

    log::info!("Analysis finished");
    super::print_skipped(&outcome.skipped);
    print_histogram(&outcome.histogram);

    Ok(DiffSummary {
        methods: outcome.rows.len(),
        histogram: outcome.histogram,
        report_conflicts: lookup.conflicts(),
        skipped: outcome.skipped.len(),
    })
}

fn write_summary_json(path: &Path, histogram: &TransitionHistogram) -> Result<()> {
    let json = serde_json::to_string_pretty(histogram)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary to {}", path.display()))
}

fn print_histogram(histogram: &TransitionHistogram) {
    println!("{}", "Classification transitions".bold());
    for (counter, count) in histogram.iter() {
        println!("  {:<24} {}", counter.to_string(), count);
    }
}
