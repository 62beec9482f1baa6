//! Instrumentation candidate selection.
//!
//! A method is worth instrumenting when it is not static and shows at least
//! one sign of nontrivial behaviour: several statements, branching, looping,
//! parameters or local state. Return-related tags do not take part.

use crate::records::MethodRecord;
use crate::tags::TagSet;
use std::path::{Path, PathBuf};

/// Pure predicate deciding whether a method is an instrumentation candidate.
pub fn is_candidate(tags: &TagSet) -> bool {
    let nontrivial = tags.multiple_statements
        || tags.ifs
        || tags.conditionals
        || tags.parameters
        || tags.switches
        || tags.loops
        || tags.local_variables;

    !tags.is_static && nontrivial
}

/// Keep the candidates, in input order.
pub fn filter_candidates(records: &[MethodRecord]) -> Vec<MethodRecord> {
    records
        .iter()
        .filter(|record| is_candidate(&record.tags))
        .cloned()
        .collect()
}

/// Derive the candidate file path from the method list path.
///
/// `source_marker` in the file name is replaced by `target_marker`. A name
/// without the marker gets `-<target_marker>` appended to its stem, so the
/// input file is never overwritten.
pub fn candidate_file_path(
    input: &Path,
    output_dir: &Path,
    source_marker: &str,
    target_marker: &str,
) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let renamed = if !source_marker.is_empty() && name.contains(source_marker) {
        name.replace(source_marker, target_marker)
    } else {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match input.extension() {
            Some(ext) => format!("{stem}-{target_marker}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{target_marker}"),
        }
    };

    output_dir.join(renamed)
}
