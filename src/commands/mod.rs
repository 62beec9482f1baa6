//! Command handlers. Each one loads its inputs, hands them to the pure core
//! and writes the results; all console output happens here.

pub mod diff;
pub mod filter;

pub use diff::{run_diff, DiffOptions, DiffSummary};
pub use filter::{run_filter, FilterOptions, FilterSummary};

use crate::errors::RowFailure;
use colored::*;

/// Print skipped rows, if any.
pub(crate) fn print_skipped(skipped: &[RowFailure]) {
    if skipped.is_empty() {
        return;
    }
    println!(
        "{} {} rows skipped:",
        "warning:".yellow().bold(),
        skipped.len()
    );
    for failure in skipped {
        println!("  ✗ {}", failure);
    }
}
