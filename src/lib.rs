// Export modules for library usage
pub mod candidates;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod errors;
pub mod io;
pub mod records;
pub mod reports;
pub mod tags;

// Re-export commonly used types
pub use crate::candidates::{filter_candidates, is_candidate};
pub use crate::classification::Classification;
pub use crate::config::{load_config, FailurePolicy, InstrumapConfig};
pub use crate::diff::{
    classification_after, diff_classifications, DiffOutcome, InvokedMethods, TransitionHistogram,
};
pub use crate::errors::{Error, Result, RowFailure};
pub use crate::records::{normalize_row, normalize_rows, MethodRecord, RawMethodRow};
pub use crate::reports::{load_lookup, ClassificationLookup, ReportEntry, ReportSources};
pub use crate::tags::{extract_tag, TagSet};
