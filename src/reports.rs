//! Loading Descartes `methods.json` reports into a single classification lookup.
//!
//! Reports are merged in load order. When two reports classify the same method
//! differently the later one wins; the collision is logged and counted but the
//! value is not reconciled.

use crate::classification::Classification;
use crate::errors::{Error, Result};
use crate::io::walker::find_report_files;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One method entry of a report. Other report fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportEntry {
    pub package: String,
    pub class: String,
    pub name: String,
    pub classification: Classification,
}

impl ReportEntry {
    /// Fully qualified method name, `package.class.name` with `/` replaced by `.`.
    pub fn full_name(&self) -> String {
        format!("{}/{}/{}", self.package, self.class, self.name).replace('/', ".")
    }
}

#[derive(Debug, Deserialize)]
struct MethodsReport {
    methods: Vec<ReportEntry>,
}

/// Where reports come from.
///
/// At least one explicit report or search root is required; this is checked
/// on construction so no I/O happens for an unusable source set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSources {
    reports: Vec<PathBuf>,
    search_roots: Vec<PathBuf>,
}

impl ReportSources {
    pub fn new(reports: Vec<PathBuf>, search_roots: Vec<PathBuf>) -> Result<Self> {
        if reports.is_empty() && search_roots.is_empty() {
            return Err(Error::Configuration(
                "either a classification report or a report folder must be specified"
                    .to_string(),
            ));
        }
        Ok(Self {
            reports,
            search_roots,
        })
    }

    /// Explicit reports first, in order, then reports discovered under each
    /// search root.
    pub fn resolve(&self, file_name: &str) -> Result<Vec<PathBuf>> {
        let mut paths = self.reports.clone();
        for root in &self.search_roots {
            let found = find_report_files(root, file_name)?;
            log::debug!("Discovered {} reports under {}", found.len(), root.display());
            paths.extend(found);
        }
        Ok(paths)
    }
}

/// Mapping from fully qualified method name to classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationLookup {
    entries: HashMap<String, Classification>,
    conflicts: usize,
}

impl ClassificationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, overwriting any earlier classification for its key.
    pub fn insert(&mut self, entry: &ReportEntry) {
        let key = entry.full_name();
        if let Some(previous) = self.entries.insert(key.clone(), entry.classification) {
            if previous != entry.classification {
                self.conflicts += 1;
                log::warn!(
                    "Conflicting classification for {}: {} replaced by {}",
                    key,
                    previous,
                    entry.classification
                );
            }
        }
    }

    /// Merge a report's entries in order.
    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = &'a ReportEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    pub fn get(&self, key: &str) -> Option<Classification> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of overwrites that changed a key's classification.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }
}

/// Parse report text.
pub fn parse_report(contents: &str, path: &Path) -> Result<Vec<ReportEntry>> {
    serde_json::from_str::<MethodsReport>(contents)
        .map(|report| report.methods)
        .map_err(|e| Error::report_parse(path, e.to_string()))
}

/// Read and parse one report file.
pub fn read_report(path: &Path) -> Result<Vec<ReportEntry>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read report {}: {e}", path.display()),
        ))
    })?;
    parse_report(&contents, path)
}

/// Load and merge the given report files, in order.
pub fn load_reports(paths: &[PathBuf]) -> Result<ClassificationLookup> {
    let mut lookup = ClassificationLookup::new();

    for path in paths {
        let entries = read_report(path)?;
        log::info!("Loading {} methods from {}", entries.len(), path.display());
        lookup.extend(&entries);
    }

    Ok(lookup)
}

/// Resolve sources and build the lookup table.
pub fn load_lookup(sources: &ReportSources, file_name: &str) -> Result<ClassificationLookup> {
    let paths = sources.resolve(file_name)?;
    load_reports(&paths)
}
