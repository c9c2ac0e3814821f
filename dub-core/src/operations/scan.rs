use crate::fs::OsFileSystem;
use crate::output::ScanResult;
use crate::pattern::{filter_files, RegexMatcher};
use crate::scanner::scan_directory;
use anyhow::Result;
use std::path::Path;

/// High-level scan operation - equivalent to `dub scan` command
pub fn scan_operation(directory: &Path, pattern: Option<&str>) -> Result<ScanResult> {
    let files = scan_directory(&OsFileSystem, directory)?;

    let files = match pattern {
        Some(pattern) => filter_files(&RegexMatcher::new(), &files, pattern)?,
        None => files,
    };

    Ok(ScanResult {
        directory: directory.display().to_string(),
        pattern: pattern.map(ToString::to_string),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DubError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_operation_filters_by_pattern() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["IMG_10.jpg", "IMG_2.jpg", "notes.txt"] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }

        let result = scan_operation(temp_dir.path(), Some("IMG_[serial]")).unwrap();
        let names: Vec<_> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["IMG_2.jpg", "IMG_10.jpg"]);
    }

    #[test]
    fn test_scan_operation_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = scan_operation(&temp_dir.path().join("missing"), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DubError>(),
            Some(DubError::InvalidPath { .. })
        ));
    }
}
