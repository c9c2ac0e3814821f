use super::entry_status;
use crate::plan::{conflict_count, pending_count, RenamePlanEntry};
use std::fmt::Write;

/// Render plan as a plain-text summary for scripts and logs
pub fn render_summary(plan: &[RenamePlanEntry]) -> String {
    let mut output = String::new();

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    writeln!(output, "Entries: {}", plan.len()).unwrap();
    writeln!(output, "Renames: {}", pending_count(plan)).unwrap();
    writeln!(output, "Conflicts: {}", conflict_count(plan)).unwrap();

    let changed: Vec<_> = plan.iter().filter(|e| !e.is_inert()).collect();
    if !changed.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[RENAMES]").unwrap();
        for entry in changed {
            writeln!(
                output,
                "{} -> {} ({})",
                entry.original_name,
                entry.new_name,
                entry_status(entry)
            )
            .unwrap();
        }
    }

    output
}
