//! Shared error types for instrumap.
//!
//! Every failure in the classification pipeline is fatal for the current run
//! unless the caller opted into [`FailurePolicy::SkipInvalid`], in which case
//! row-level failures are collected as [`RowFailure`]s instead.
//!
//! [`FailurePolicy::SkipInvalid`]: crate::config::FailurePolicy::SkipInvalid

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for instrumap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A tag blob has no `<tag>=<word>` assertion for a required tag
    #[error("missing tag '{tag}' in tag blob \"{blob}\"")]
    MissingTag { tag: String, blob: String },

    /// A classification report does not have the expected structure
    #[error("malformed classification report {}: {message}", path.display())]
    ReportParse { path: PathBuf, message: String },

    /// Invalid invocation, e.g. no classification report source was supplied
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An invoked method is absent from every loaded report
    #[error("no classification found for invoked method '{key}'")]
    MissingClassification { key: String },

    /// A classification label outside the known set
    #[error("unknown classification label '{0}'")]
    UnknownClassification(String),

    /// A required column is absent from a table header
    #[error("missing column '{column}' in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A data row has more cells than the header names
    #[error("row {row} of {} has {found} cells, but the header has {expected}", path.display())]
    RowTooLong {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Wrapped CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing tag error
    pub fn missing_tag(tag: impl Into<String>, blob: impl Into<String>) -> Self {
        Self::MissingTag {
            tag: tag.into(),
            blob: blob.into(),
        }
    }

    /// Create a report parse error with path context
    pub fn report_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReportParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing column error with path context
    pub fn missing_column(column: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create a row width error; `row` is the zero-based data row index
    pub fn row_too_long(path: impl Into<PathBuf>, row: usize, found: usize, expected: usize) -> Self {
        Self::RowTooLong {
            path: path.into(),
            row,
            found,
            expected,
        }
    }

    /// Whether the error concerns a single row and may be skipped under
    /// a lenient failure policy.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::MissingTag { .. }
                | Self::MissingClassification { .. }
                | Self::UnknownClassification(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// A row that was dropped because it failed to process.
///
/// `row` is the zero-based data row index (header excluded).
#[derive(Debug)]
pub struct RowFailure {
    pub row: usize,
    pub error: Error,
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}
