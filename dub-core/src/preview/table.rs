use super::{entry_status, paint_segments};
use crate::plan::RenamePlanEntry;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render the plan as a table, one row per entry
pub fn render_table(plan: &[RenamePlanEntry], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Original", "New", "Status"]);
    }

    for (i, entry) in plan.iter().enumerate() {
        let status = entry_status(entry);
        let status_cell = if use_color {
            let color = match status {
                "conflict" => Color::Red,
                "unchanged" => Color::DarkGrey,
                _ => Color::Green,
            };
            Cell::new(status).fg(color)
        } else {
            Cell::new(status)
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(paint_segments(
                &entry.original_diff,
                &entry.original_name,
                use_color,
            )),
            Cell::new(paint_segments(&entry.new_diff, &entry.new_name, use_color)),
            status_cell,
        ]);
    }

    table.to_string()
}
