use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects every file with an exact file name under a root.
pub struct ReportWalker {
    root: PathBuf,
    file_name: String,
}

impl ReportWalker {
    pub fn new(root: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            root,
            file_name: file_name.into(),
        }
    }

    /// Walk the tree. Entries are visited in file name order so that the
    /// result does not depend on directory listing order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;

            if entry.file_type().is_file() && self.should_collect(entry.path()) {
                log::debug!("Found report {}", entry.path().display());
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_collect(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy() == self.file_name.as_str())
            .unwrap_or(false)
    }
}

pub fn find_report_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    ReportWalker::new(root.to_path_buf(), file_name).walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nested_reports_only_by_exact_name() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("module-a/target/pit-reports")).unwrap();
        fs::create_dir_all(root.join("module-b")).unwrap();
        fs::write(root.join("module-a/target/pit-reports/methods.json"), "{}").unwrap();
        fs::write(root.join("module-b/methods.json"), "{}").unwrap();
        fs::write(root.join("module-b/methods.json.bak"), "{}").unwrap();
        fs::write(root.join("module-b/old-methods.json"), "{}").unwrap();

        let found = find_report_files(root, "methods.json").unwrap();
        assert_eq!(
            found,
            vec![
                root.join("module-a/target/pit-reports/methods.json"),
                root.join("module-b/methods.json"),
            ]
        );
    }

    #[test]
    fn test_empty_folder_yields_nothing() {
        let temp = TempDir::new().unwrap();
        assert!(find_report_files(temp.path(), "methods.json")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(find_report_files(&temp.path().join("absent"), "methods.json").is_err());
    }
}
