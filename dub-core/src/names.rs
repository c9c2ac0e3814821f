use crate::error::Result;
use crate::fs::FileSystem;
use std::path::Path;

/// Parse a names file: one desired name per line, trimmed, blank lines
/// dropped. Handles both `\n` and `\r\n` line endings.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Read and parse a names file through the filesystem port.
pub fn read_names_file(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>> {
    let bytes = fs.read_file(path)?;
    Ok(parse_names(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    #[test]
    fn test_parse_names_trims_and_drops_blanks() {
        let text = "  first \n\nsecond\r\n   \nthird";
        assert_eq!(parse_names(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_names("").is_empty());
        assert!(parse_names("\n\n").is_empty());
    }

    #[test]
    fn test_read_names_file() {
        let mem = MemoryFileSystem::new();
        mem.add_file("/lists/names.txt", "alpha\nbeta\n");
        let names = read_names_file(&mem, Path::new("/lists/names.txt")).unwrap();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_read_missing_names_file() {
        let mem = MemoryFileSystem::new();
        assert!(read_names_file(&mem, Path::new("/nope.txt")).is_err());
    }
}
