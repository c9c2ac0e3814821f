mod diff;
mod summary;
mod table;

pub use diff::render_diff;
pub use summary::render_summary;
pub use table::render_table;

use crate::diff::{DiffKind, DiffSegment};
use crate::plan::RenamePlanEntry;
use nu_ansi_term::{Color as AnsiColor, Style};
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Diff,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "diff" => Ok(Self::Diff),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &[RenamePlanEntry], format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(plan, use_color),
        Preview::Diff => render_diff(plan, use_color),
        Preview::Summary => render_summary(plan),
        Preview::Json => serde_json::to_string_pretty(plan).unwrap_or_default(),
        Preview::None => String::new(),
    }
}

/// Status label shown next to an entry
pub(crate) fn entry_status(entry: &RenamePlanEntry) -> &'static str {
    if entry.conflict {
        "conflict"
    } else if entry.is_inert() {
        "unchanged"
    } else {
        "rename"
    }
}

/// Paint diff segments, highlighting deleted and inserted runs. Falls back
/// to `plain` when the entry has no diff (the name did not change).
pub(crate) fn paint_segments(segments: &[DiffSegment], plain: &str, use_color: bool) -> String {
    if !use_color || segments.is_empty() {
        return plain.to_string();
    }

    let mut out = String::new();
    for segment in segments {
        let painted = match segment.kind {
            DiffKind::Equal => segment.text.clone(),
            // Deleted run background: #c0526a
            DiffKind::Delete => Style::new()
                .on(AnsiColor::Rgb(0xC0, 0x52, 0x6A))
                .fg(AnsiColor::Rgb(0xFF, 0xFF, 0xFF))
                .paint(segment.text.as_str())
                .to_string(),
            // Inserted run background: #00a958
            DiffKind::Insert => Style::new()
                .on(AnsiColor::Rgb(0x00, 0xA9, 0x58))
                .fg(AnsiColor::Rgb(0xFF, 0xFF, 0xFF))
                .paint(segment.text.as_str())
                .to_string(),
        };
        out.push_str(&painted);
    }
    out
}

/// Format a byte count for display: `512 B`, `1.5 KB`, `1.0 MB`, `1.0 GB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        s if s >= GB => format!("{:.1} GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.1} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.1} KB", s as f64 / KB as f64),
        s => format!("{} B", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_diff;

    #[test]
    fn test_preview_from_str() {
        assert_eq!("table".parse::<Preview>().unwrap(), Preview::Table);
        assert_eq!("DIFF".parse::<Preview>().unwrap(), Preview::Diff);
        assert_eq!("json".parse::<Preview>().unwrap(), Preview::Json);
        assert!("matrix".parse::<Preview>().is_err());
    }

    #[test]
    fn test_should_use_color_prefers_explicit() {
        assert!(should_use_color_with_detector(Some(true), || false));
        assert!(!should_use_color_with_detector(Some(false), || true));
        assert!(should_use_color_with_detector(None, || true));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1.0 MB");
        assert_eq!(format_file_size(1_610_612_736), "1.5 GB");
    }

    #[test]
    fn test_paint_segments_without_color_is_plain() {
        let (old, _) = compute_diff("a.txt", "b.txt");
        assert_eq!(paint_segments(&old, "a.txt", false), "a.txt");
    }

    #[test]
    fn test_paint_segments_with_color_highlights_changes() {
        let (_, new) = compute_diff("a.txt", "b.txt");
        let painted = paint_segments(&new, "b.txt", true);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains(".txt"));
    }
}
