//! Run configuration.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `.instrumap.toml`, and command line flags. Later layers win.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".instrumap.toml";

/// Report filename matched during directory discovery
pub const DEFAULT_REPORT_FILE_NAME: &str = "methods.json";
pub const DEFAULT_SOURCE_MARKER: &str = "extracted-methods";
pub const DEFAULT_TARGET_MARKER: &str = "instrumentation-candidates";
pub const DEFAULT_DIFF_OUTPUT: &str = "./invoked-methods-result.csv";

/// How row-level failures are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the run on the first failing row
    #[default]
    FailFast,
    /// Drop failing rows, log them, and keep going
    SkipInvalid,
}

impl FailurePolicy {
    /// Whether `error` should be skipped rather than propagated.
    pub fn skips(&self, error: &Error) -> bool {
        *self == FailurePolicy::SkipInvalid && error.is_row_level()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    pub file_name: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub output_dir: PathBuf,
    pub source_marker: String,
    pub target_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            source_marker: DEFAULT_SOURCE_MARKER.to_string(),
            target_marker: DEFAULT_TARGET_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub output: PathBuf,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_DIFF_OUTPUT),
        }
    }
}

/// Contents of `.instrumap.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstrumapConfig {
    pub failure_policy: FailurePolicy,
    pub reports: ReportsConfig,
    pub filter: FilterConfig,
    pub diff: DiffConfig,
}

/// Read a file into a string
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str, path: &Path) -> Result<InstrumapConfig> {
    toml::from_str::<InstrumapConfig>(contents).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `.instrumap.toml` in the current
/// directory is used when present, and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<InstrumapConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    match read_config_file(&path) {
        Ok(contents) => {
            let config = parse_config(&contents, &path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            Ok(InstrumapConfig::default())
        }
        Err(e) => Err(Error::Io(e)),
    }
}
