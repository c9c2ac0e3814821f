use crate::error::{DubError, Result};
use crate::scanner::FileEntry;
use regex::Regex;
use std::cell::RefCell;

/// Shortcut tokens and the expressions they expand to.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("[serial]", r"(\d+)"),
    ("[number]", r"(\d+)"),
    ("[any]", r"(.*)"),
    ("[word]", r"(\w+)"),
    ("[alpha]", r"([a-zA-Z]+)"),
];

pub trait PatternMatcher {
    /// Replace shortcut tokens with their expressions. Unknown bracket tokens
    /// are left alone.
    fn expand_shortcuts(&self, pattern: &str) -> String;

    /// Whether `pattern` matches anywhere in `text`.
    fn is_match(&self, pattern: &str, text: &str) -> Result<bool>;
}

/// [`PatternMatcher`] backed by the `regex` crate. Remembers the last
/// compiled pattern so filtering a directory compiles it once.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    last: RefCell<Option<Regex>>,
}

impl RegexMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternMatcher for RegexMatcher {
    fn expand_shortcuts(&self, pattern: &str) -> String {
        expand_shortcuts(pattern)
    }

    fn is_match(&self, pattern: &str, text: &str) -> Result<bool> {
        let mut last = self.last.borrow_mut();
        if let Some(regex) = last.as_ref().filter(|r| r.as_str() == pattern) {
            return Ok(regex.is_match(text));
        }

        let regex = Regex::new(pattern).map_err(|e| DubError::invalid_pattern(pattern, &e))?;
        let matched = regex.is_match(text);
        *last = Some(regex);
        Ok(matched)
    }
}

pub fn expand_shortcuts(pattern: &str) -> String {
    SHORTCUTS
        .iter()
        .fold(pattern.to_string(), |acc, (token, regex)| {
            acc.replace(token, regex)
        })
}

/// Keep the files whose stem matches `pattern` after shortcut expansion.
///
/// Stems are used so the extension cannot satisfy a pattern like `[alpha]`.
/// An empty pattern keeps every file.
pub fn filter_files(
    matcher: &dyn PatternMatcher,
    files: &[FileEntry],
    pattern: &str,
) -> Result<Vec<FileEntry>> {
    if pattern.is_empty() {
        return Ok(files.to_vec());
    }

    let expanded = matcher.expand_shortcuts(pattern);
    let mut matched = Vec::new();
    for file in files {
        if matcher.is_match(&expanded, file.stem())? {
            matched.push(file.clone());
        }
    }
    Ok(matched)
}
