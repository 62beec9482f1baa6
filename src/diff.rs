//! Before/after classification diff for invoked methods.
//!
//! Each invoked method carries the classification it had before new tests
//! were added. The new classification is looked up in the merged reports,
//! except that a `not-covered` result keeps the previous classification: a
//! method missing from the new run's coverage has not regressed.

use crate::classification::Classification;
use crate::config::FailurePolicy;
use crate::errors::{Error, Result, RowFailure};
use crate::io::Table;
use crate::reports::ClassificationLookup;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::path::Path;

pub const PARENT_FQN_COLUMN: &str = "parent-FQN";
pub const METHOD_NAME_COLUMN: &str = "method-name";
pub const CLASSIFICATION_COLUMN: &str = "classification";
pub const CLASSIFICATION_AFTER_COLUMN: &str = "classification-after";

/// Lookup key of an invoked method.
pub fn method_key(parent_fqn: &str, method_name: &str) -> String {
    format!("{parent_fqn}.{method_name}")
}

/// The classification written to `classification-after`.
pub fn classification_after(before: Classification, reported: Classification) -> Classification {
    if reported == Classification::NotCovered {
        before
    } else {
        reported
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    After,
}

impl Phase {
    fn suffix(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }
}

/// One histogram counter, displayed as `<classification>-<phase>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Counter {
    pub classification: Classification,
    pub phase: Phase,
}

impl Counter {
    pub const fn new(classification: Classification, phase: Phase) -> Self {
        Self {
            classification,
            phase,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.classification, self.phase.suffix())
    }
}

/// Counters present from the start, in reporting order.
const SEEDED_COUNTERS: [Counter; 5] = [
    Counter::new(Classification::PseudoTested, Phase::Before),
    Counter::new(Classification::NotCovered, Phase::After),
    Counter::new(Classification::PseudoTested, Phase::After),
    Counter::new(Classification::PartiallyTested, Phase::After),
    Counter::new(Classification::Tested, Phase::After),
];

/// Before/after transition counts over all diffed methods.
///
/// Starts with the five seeded counters at zero. Any other counter is added
/// the first time it is incremented and reported after the seeded ones, in
/// order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionHistogram {
    counts: Vec<(Counter, usize)>,
}

impl Default for TransitionHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionHistogram {
    pub fn new() -> Self {
        Self {
            counts: SEEDED_COUNTERS.iter().map(|c| (*c, 0)).collect(),
        }
    }

    fn increment(&mut self, counter: Counter) {
        match self.counts.iter_mut().find(|(c, _)| *c == counter) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((counter, 1)),
        }
    }

    /// Count one method's transition.
    pub fn record(&mut self, before: Classification, after: Classification) {
        self.increment(Counter::new(before, Phase::Before));
        self.increment(Counter::new(after, Phase::After));
    }

    pub fn count(&self, classification: Classification, phase: Phase) -> usize {
        let counter = Counter::new(classification, phase);
        self.counts
            .iter()
            .find(|(c, _)| *c == counter)
            .map_or(0, |(_, n)| *n)
    }

    /// Look a counter up by its display key, e.g. `tested-after`.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(c, _)| c.to_string() == key)
            .map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Counter, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Number of methods recorded.
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .filter(|(c, _)| c.phase == Phase::After)
            .map(|(_, n)| n)
            .sum()
    }
}

impl fmt::Display for TransitionHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .counts
            .iter()
            .map(|(c, n)| format!("'{c}': {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{body}}}")
    }
}

impl Serialize for TransitionHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (counter, count) in &self.counts {
            map.serialize_entry(&counter.to_string(), count)?;
        }
        map.end()
    }
}

/// The invoked-methods table with its key columns located.
#[derive(Debug, Clone)]
pub struct InvokedMethods {
    table: Table,
    parent_fqn: usize,
    method_name: usize,
    classification: usize,
}

impl InvokedMethods {
    /// Fails with [`Error::MissingColumn`] when a key column is absent.
    pub fn from_table(table: Table, path: &Path) -> Result<Self> {
        let parent_fqn = table.column(PARENT_FQN_COLUMN, path)?;
        let method_name = table.column(METHOD_NAME_COLUMN, path)?;
        let classification = table.column(CLASSIFICATION_COLUMN, path)?;
        Ok(Self {
            table,
            parent_fqn,
            method_name,
            classification,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    fn key(&self, row: &[String]) -> String {
        method_key(&row[self.parent_fqn], &row[self.method_name])
    }

    fn diff_row(&self, row: &[String], lookup: &ClassificationLookup) -> Result<DiffedRow> {
        let before: Classification = row[self.classification].parse()?;
        let key = self.key(row);
        let reported = lookup
            .get(&key)
            .ok_or(Error::MissingClassification { key })?;

        Ok(DiffedRow {
            cells: row.to_vec(),
            before,
            reported,
            after: classification_after(before, reported),
        })
    }
}

/// An invoked-methods row with its new classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffedRow {
    /// The original cells, unchanged
    pub cells: Vec<String>,
    pub before: Classification,
    /// Value found in the reports, before the `not-covered` fallback
    pub reported: Classification,
    pub after: Classification,
}

#[derive(Debug)]
pub struct DiffOutcome {
    pub headers: Vec<String>,
    pub rows: Vec<DiffedRow>,
    pub histogram: TransitionHistogram,
    pub skipped: Vec<RowFailure>,
}

impl DiffOutcome {
    /// The output table: input columns plus `classification-after`.
    pub fn to_table(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.cells.clone();
                cells.push(row.after.to_string());
                cells
            })
            .collect();
        Table {
            headers: self.headers.clone(),
            rows,
        }
    }
}

/// Diff every invoked method against the lookup, in input order.
pub fn diff_classifications(
    invoked: &InvokedMethods,
    lookup: &ClassificationLookup,
    policy: FailurePolicy,
) -> Result<DiffOutcome> {
    let mut headers = invoked.headers().to_vec();
    headers.push(CLASSIFICATION_AFTER_COLUMN.to_string());

    let mut outcome = DiffOutcome {
        headers,
        rows: Vec::with_capacity(invoked.len()),
        histogram: TransitionHistogram::new(),
        skipped: Vec::new(),
    };

    for (index, row) in invoked.table.rows.iter().enumerate() {
        match invoked.diff_row(row, lookup) {
            Ok(diffed) => {
                outcome.histogram.record(diffed.before, diffed.after);
                outcome.rows.push(diffed);
            }
            Err(error) if policy.skips(&error) => {
                log::warn!("Skipping invoked method at row {}: {}", index, error);
                outcome.skipped.push(RowFailure { row: index, error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(outcome)
}
