use super::paint_segments;
use crate::plan::RenamePlanEntry;
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;

/// Render changed entries as `- old` / `+ new` line pairs
pub fn render_diff(plan: &[RenamePlanEntry], use_color: bool) -> String {
    let mut output = String::new();

    for entry in plan.iter().filter(|e| !e.is_inert()) {
        let old = paint_segments(&entry.original_diff, &entry.original_name, use_color);
        let new = paint_segments(&entry.new_diff, &entry.new_name, use_color);

        if use_color {
            writeln!(output, "{} {}", AnsiColor::Red.paint("-"), old).unwrap();
            writeln!(output, "{} {}", AnsiColor::Green.paint("+"), new).unwrap();
        } else {
            writeln!(output, "- {}", old).unwrap();
            writeln!(output, "+ {}", new).unwrap();
        }

        if entry.conflict {
            let note = "  ! conflicts with another entry, will be skipped";
            if use_color {
                writeln!(output, "{}", Style::new().fg(AnsiColor::Yellow).paint(note)).unwrap();
            } else {
                writeln!(output, "{}", note).unwrap();
            }
        }
    }

    if output.is_empty() {
        output.push_str("No changes\n");
    }

    output
}
