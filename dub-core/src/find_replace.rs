use crate::error::{DubError, Result};
use crate::scanner::FileEntry;
use regex::Regex;

/// Apply a regex substitution to every file's stem.
///
/// Returns one stem per file. Stems the regex does not match are returned
/// unchanged, and an empty `search` returns every stem as is. `replace` may
/// refer to capture groups with `$1` or `${name}`.
pub fn find_replace(files: &[FileEntry], search: &str, replace: &str) -> Result<Vec<String>> {
    if search.is_empty() {
        return Ok(files.iter().map(|f| f.stem().to_string()).collect());
    }

    let regex = Regex::new(search).map_err(|e| DubError::invalid_pattern(search, &e))?;

    Ok(files
        .iter()
        .map(|f| regex.replace_all(f.stem(), replace).into_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_files() -> Vec<FileEntry> {
        ["photo_001.jpg", "photo_002.jpg", "document.pdf"]
            .iter()
            .map(|n| FileEntry::for_name(n))
            .collect()
    }

    #[test]
    fn test_basic_replacement() {
        let names = find_replace(&sample_files(), "photo", "vacation").unwrap();
        assert_eq!(names, vec!["vacation_001", "vacation_002", "document"]);
    }

    #[test]
    fn test_capture_group_swap() {
        let names = find_replace(&sample_files(), r"(\w+)_(\d+)", "${2}_${1}").unwrap();
        assert_eq!(names, vec!["001_photo", "002_photo", "document"]);
    }

    #[test]
    fn test_no_match_keeps_stem() {
        let names = find_replace(&sample_files(), "xyz", "abc").unwrap();
        assert_eq!(names, vec!["photo_001", "photo_002", "document"]);
    }

    #[test]
    fn test_invalid_regex() {
        let err = find_replace(&sample_files(), "[invalid", "x").unwrap_err();
        assert!(matches!(err, DubError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_search_is_noop() {
        let names = find_replace(&sample_files(), "", "prefix").unwrap();
        assert_eq!(names, vec!["photo_001", "photo_002", "document"]);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let files = vec![FileEntry::for_name("a-b-c.txt")];
        assert_eq!(find_replace(&files, "-", "_").unwrap(), vec!["a_b_c"]);
    }
}
