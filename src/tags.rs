//! Tag blob parsing.
//!
//! The method extractor serialises structural properties of each method into a
//! single `tags` cell, e.g. `{ifs=true, loops=false, static=false, ...}`. Only
//! `key=value` assertions whose key and value are word characters are
//! recognised; the surrounding punctuation is ignored.
//!
//! A value is `true` only when it is exactly the text `true`. Anything else,
//! including `True` or `1`, is `false`. A missing key is an error.

use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ASSERTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=(\w+)").unwrap());

/// Tag keys as they appear in the blob, in output column order.
pub const TAG_KEYS: [&str; 10] = [
    "local_variables",
    "conditionals",
    "multiple_statements",
    "loops",
    "parameters",
    "returns",
    "switches",
    "ifs",
    "static",
    "returns_primitives",
];

/// Iterate over every `key=value` assertion in a blob, in order of appearance.
fn assertions(blob: &str) -> impl Iterator<Item = (&str, &str)> {
    ASSERTION.captures_iter(blob).filter_map(|caps| {
        let key = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        Some((key, value))
    })
}

/// Extract a single boolean tag from a blob.
///
/// The first assertion for `tag` wins when a blob repeats a key.
pub fn extract_tag(tag: &str, blob: &str) -> Result<bool> {
    assertions(blob)
        .find(|(key, _)| *key == tag)
        .map(|(_, value)| value == "true")
        .ok_or_else(|| Error::missing_tag(tag, blob))
}

/// The structural properties of one method, parsed from its tag blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagSet {
    pub local_variables: bool,
    pub conditionals: bool,
    pub multiple_statements: bool,
    pub loops: bool,
    pub parameters: bool,
    pub returns: bool,
    pub switches: bool,
    pub ifs: bool,
    pub is_static: bool,
    pub returns_primitives: bool,
}

impl TagSet {
    /// Parse all ten tags in a single pass over the blob.
    ///
    /// Fails with [`Error::MissingTag`] naming the first absent key, in
    /// [`TAG_KEYS`] order.
    pub fn parse(blob: &str) -> Result<Self> {
        let mut seen: [Option<bool>; TAG_KEYS.len()] = [None; TAG_KEYS.len()];

        for (key, value) in assertions(blob) {
            if let Some(slot) = TAG_KEYS.iter().position(|k| *k == key) {
                seen[slot].get_or_insert(value == "true");
            }
        }

        let get = |slot: usize| seen[slot].ok_or_else(|| Error::missing_tag(TAG_KEYS[slot], blob));

        Ok(TagSet {
            local_variables: get(0)?,
            conditionals: get(1)?,
            multiple_statements: get(2)?,
            loops: get(3)?,
            parameters: get(4)?,
            returns: get(5)?,
            switches: get(6)?,
            ifs: get(7)?,
            is_static: get(8)?,
            returns_primitives: get(9)?,
        })
    }

    /// Values in [`TAG_KEYS`] order.
    pub fn values(&self) -> [bool; 10] {
        [
            self.local_variables,
            self.conditionals,
            self.multiple_statements,
            self.loops,
            self.parameters,
            self.returns,
            self.switches,
            self.ifs,
            self.is_static,
            self.returns_primitives,
        ]
    }
}
