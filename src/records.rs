//! Method records as produced by the method extractor, and their normalized form.

use crate::config::FailurePolicy;
use crate::errors::{Error, Result, RowFailure};
use crate::tags::TagSet;
use serde::Deserialize;

/// Columns a method list must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "visibility",
    "parent-FQN",
    "method-name",
    "param-list",
    "return-type",
    "tags",
];

/// Header of the normalized record table.
pub const NORMALIZED_COLUMNS: [&str; 15] = [
    "visibility",
    "parent-FQN",
    "method-name",
    "param-list",
    "return-type",
    "local-variables",
    "conditionals",
    "multiple-statements",
    "loops",
    "parameters",
    "returns",
    "switches",
    "ifs",
    "static",
    "returns-primitives",
];

/// One row of an extracted method list. Extra columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMethodRow {
    pub visibility: String,
    #[serde(rename = "parent-FQN")]
    pub parent_fqn: String,
    #[serde(rename = "method-name")]
    pub method_name: String,
    #[serde(rename = "param-list")]
    pub param_list: String,
    #[serde(rename = "return-type")]
    pub return_type: String,
    #[serde(default)]
    pub tags: String,
}

/// A method with its tag blob resolved into typed flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub visibility: String,
    pub parent_fqn: String,
    pub method_name: String,
    pub param_list: String,
    pub return_type: String,
    pub tags: TagSet,
}

impl MethodRecord {
    /// Cells in [`NORMALIZED_COLUMNS`] order.
    pub fn to_record(&self) -> Vec<String> {
        let mut cells = vec![
            self.visibility.clone(),
            self.parent_fqn.clone(),
            self.method_name.clone(),
            self.param_list.clone(),
            self.return_type.clone(),
        ];
        cells.extend(self.tags.values().iter().map(bool::to_string));
        cells
    }
}

/// Reduce a serialized list literal to its contents.
///
/// Strips one leading `[` and everything from the last `]` onwards.
/// Text without brackets is returned unchanged.
pub fn strip_param_list(raw: &str) -> &str {
    let inner = raw.strip_prefix('[').unwrap_or(raw);
    match inner.rfind(']') {
        Some(end) => &inner[..end],
        None => inner,
    }
}

/// Normalize a single row.
pub fn normalize_row(row: &RawMethodRow) -> Result<MethodRecord> {
    Ok(MethodRecord {
        visibility: row.visibility.clone(),
        parent_fqn: row.parent_fqn.clone(),
        method_name: row.method_name.clone(),
        param_list: strip_param_list(&row.param_list).to_string(),
        return_type: row.return_type.clone(),
        tags: TagSet::parse(&row.tags)?,
    })
}

/// Records that normalized cleanly, plus the rows that were skipped.
#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<MethodRecord>,
    pub skipped: Vec<RowFailure>,
}

/// Normalize every row, preserving row order.
///
/// Under [`FailurePolicy::FailFast`] the first failing row aborts the whole
/// batch. Under [`FailurePolicy::SkipInvalid`] row-level failures are
/// collected and the row is left out.
pub fn normalize_rows(rows: &[RawMethodRow], policy: FailurePolicy) -> Result<Normalized> {
    let mut normalized = Normalized::default();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row) {
            Ok(record) => normalized.records.push(record),
            Err(error) if policy.skips(&error) => {
                log::warn!(
                    "Skipping {}.{} (row {}): {}",
                    row.parent_fqn,
                    row.method_name,
                    index,
                    error
                );
                normalized.skipped.push(RowFailure { row: index, error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(normalized)
}

/// Check that a header row carries every required column.
pub fn check_columns(headers: &[String], path: &std::path::Path) -> Result<()> {
    REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == *column))
        .map_or(Ok(()), |column| Err(Error::missing_column(*column, path)))
}
