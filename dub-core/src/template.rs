//! Name templates such as `IMG_{date:%Y%m%d}_{index:4}`.
//!
//! A token has the shape `{name}`, `{name:format}`, `{name|pipe}` or
//! `{name:format|pipe}`. Recognised names:
//!
//! - `index` - 1-based position, `format` is a zero-padded minimum width
//! - `original` - the file stem
//! - `ext` - the extension without its dot
//! - `date` - modification time, `format` is a strftime string (default `%Y-%m-%d`)
//! - `parent` - name of the containing directory
//!
//! Pipes (`upper`, `lower`, `title`) only apply to the string tokens
//! `original`, `ext` and `parent`. Unknown token names are left verbatim.

use crate::scanner::FileEntry;
use chrono::format::{Item, StrftimeItems};
use regex::{Captures, Regex};
use std::fmt::Write;
use std::sync::LazyLock;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\w+)(?::([^}|]+))?(?:\|(\w+))?\}").expect("template token regex is valid")
});

/// Expand `template` for `file` at the zero-based `index` of its sequence.
pub fn expand_template(template: &str, file: &FileEntry, index: usize) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures| expand_token(caps, file, index))
        .into_owned()
}

/// Expand `template` once per file, in order.
pub fn expand_names(template: &str, files: &[FileEntry]) -> Vec<String> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| expand_template(template, file, index))
        .collect()
}

fn expand_token(caps: &Captures, file: &FileEntry, index: usize) -> String {
    let format = caps.get(2).map(|m| m.as_str());
    let pipe = caps.get(3).map(|m| m.as_str());

    let text = match &caps[1] {
        "index" => return format_index(index + 1, format),
        "date" => return format_date(file, format),
        "original" => file.stem().to_string(),
        "ext" => file.extension.trim_start_matches('.').to_string(),
        "parent" => file.parent_name(),
        _ => return caps[0].to_string(),
    };

    match pipe {
        Some(pipe) => apply_pipe(&text, pipe),
        None => text,
    }
}

fn format_index(position: usize, format: Option<&str>) -> String {
    match format.and_then(|f| f.parse::<usize>().ok()) {
        Some(width) if width > 0 => format!("{position:0width$}"),
        _ => position.to_string(),
    }
}

fn format_date(file: &FileEntry, format: Option<&str>) -> String {
    let format = format
        .filter(|f| !StrftimeItems::new(f).any(|item| matches!(item, Item::Error)))
        .unwrap_or(DEFAULT_DATE_FORMAT);

    let mut out = String::new();
    if write!(out, "{}", file.modified_at.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", file.modified_at.format(DEFAULT_DATE_FORMAT));
    }
    out
}

fn apply_pipe(text: &str, pipe: &str) -> String {
    match pipe {
        "upper" => text.to_uppercase(),
        "lower" => text.to_lowercase(),
        "title" => title_case(text),
        _ => text.to_string(),
    }
}

/// Uppercase the first letter of every word and lowercase the rest. Words are
/// separated by anything other than letters, digits, `_` and `'`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_' || ch == '\'');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample_file() -> FileEntry {
        let modified = Local.with_ymd_and_hms(2026, 2, 17, 10, 30, 0).unwrap();
        FileEntry::from_path("/vacation_photos/photo_sunset.jpg", 1024, modified)
    }

    #[test]
    fn test_index_and_original() {
        assert_eq!(
            expand_template("{original}_{index}", &sample_file(), 0),
            "photo_sunset_1"
        );
    }

    #[test]
    fn test_zero_padded_index() {
        assert_eq!(
            expand_template("file_{index:3}", &sample_file(), 4),
            "file_005"
        );
    }

    #[test]
    fn test_invalid_index_width_falls_back() {
        let file = sample_file();
        assert_eq!(expand_template("{index:abc}", &file, 6), "7");
        assert_eq!(expand_template("{index:0}", &file, 6), "7");
        assert_eq!(expand_template("{index:-2}", &file, 6), "7");
    }

    #[test]
    fn test_ext() {
        assert_eq!(
            expand_template("{original}.{ext}", &sample_file(), 0),
            "photo_sunset.jpg"
        );
    }

    #[test]
    fn test_date_default_and_custom() {
        let file = sample_file();
        assert_eq!(
            expand_template("{date}_{original}", &file, 0),
            "2026-02-17_photo_sunset"
        );
        assert_eq!(expand_template("{date:%Y%m%d}", &file, 0), "20260217");
    }

    #[test]
    fn test_invalid_date_format_uses_default() {
        assert_eq!(expand_template("{date:%Q}", &sample_file(), 0), "2026-02-17");
    }

    #[test]
    fn test_parent() {
        assert_eq!(
            expand_template("{parent}_{index}", &sample_file(), 0),
            "vacation_photos_1"
        );
        assert_eq!(
            expand_template("{parent|upper}", &sample_file(), 0),
            "VACATION_PHOTOS"
        );
    }

    #[test]
    fn test_pipes() {
        let file = sample_file();
        assert_eq!(expand_template("{original|upper}", &file, 0), "PHOTO_SUNSET");
        assert_eq!(expand_template("{original|lower}", &file, 0), "photo_sunset");
        assert_eq!(expand_template("{original|title}", &file, 0), "Photo_sunset");
        assert_eq!(expand_template("{ext|upper}", &file, 0), "JPG");
    }

    #[test]
    fn test_pipe_ignored_on_index() {
        assert_eq!(expand_template("{index|upper}", &sample_file(), 0), "1");
    }

    #[test]
    fn test_unknown_tokens_and_literals() {
        let file = sample_file();
        assert_eq!(expand_template("plain_name", &file, 0), "plain_name");
        assert_eq!(expand_template("{size}_{index}", &file, 0), "{size}_1");
        assert_eq!(expand_template("{original", &file, 0), "{original");
    }

    #[test]
    fn test_mixed_tokens() {
        assert_eq!(
            expand_template("IMG_{date:%Y%m%d}_{index:4}", &sample_file(), 41),
            "IMG_20260217_0042"
        );
    }

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("my-file name"), "My-File Name");
        assert_eq!(title_case("HELLO world"), "Hello World");
    }

    #[test]
    fn test_expand_names_uses_positions() {
        let files = vec![FileEntry::for_name("a.txt"), FileEntry::for_name("b.txt")];
        assert_eq!(
            expand_names("{original}_{index:2}", &files),
            vec!["a_01", "b_02"]
        );
    }
}
