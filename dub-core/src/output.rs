use crate::execute::RenameOutcome;
use crate::plan::RenamePlanEntry;
use crate::preview::format_file_size;
use crate::scanner::FileEntry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a scan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResult {
    pub directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub files: Vec<FileEntry>,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: String,
    pub entries: usize,
    pub renames: usize,
    pub conflicts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_path: Option<String>,
    pub plan: Vec<RenamePlanEntry>,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub outcome: RenameOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Result of a rename operation (plan, confirm and apply in one step)
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub renames: usize,
    pub conflicts: usize,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RenameOutcome>,
    pub plan: Vec<RenamePlanEntry>,
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub outcome: RenameOutcome,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for ScanResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "scan",
            "directory": self.directory,
            "pattern": self.pattern,
            "files": self.files,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        for file in &self.files {
            writeln!(
                output,
                "{:>10}  {}  {}",
                format_file_size(file.size_bytes),
                file.modified_at.format("%Y-%m-%d %H:%M"),
                file.name
            )
            .unwrap();
        }

        match &self.pattern {
            Some(pattern) => writeln!(
                output,
                "{} files in {} matching '{}'",
                self.files.len(),
                self.directory,
                pattern
            )
            .unwrap(),
            None => writeln!(output, "{} files in {}", self.files.len(), self.directory).unwrap(),
        }

        output
    }
}

impl OutputFormatter for PlanResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "plan_path": self.plan_path,
            "summary": {
                "entries": self.entries,
                "renames": self.renames,
                "conflicts": self.conflicts,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Plan: {} renames across {} files in {}",
            self.renames, self.entries, self.directory
        )
        .unwrap();

        if self.conflicts > 0 {
            writeln!(
                output,
                "⚠ {} entries conflict and will be skipped",
                self.conflicts
            )
            .unwrap();
        }

        if let Some(path) = &self.plan_path {
            writeln!(output, "Plan written to {}", path).unwrap();
            writeln!(output, "Apply with: dub apply").unwrap();
        }

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.outcome.success,
            "operation": "apply",
            "outcome": self.outcome,
            "log_file": self.log_file,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format_outcome(&self.outcome);
        if self.outcome.success && self.outcome.renamed_count > 0 {
            output.push_str("Undo with: dub undo\n");
        }
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.outcome.as_ref().map_or(true, |o| o.success),
            "operation": "rename",
            "applied": self.applied,
            "summary": {
                "renames": self.renames,
                "conflicts": self.conflicts,
            },
            "outcome": self.outcome,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        match &self.outcome {
            Some(outcome) => {
                let mut output = format_outcome(outcome);
                if outcome.success && outcome.renamed_count > 0 {
                    output.push_str("Undo with: dub undo\n");
                }
                output
            },
            None if self.renames == 0 => "Nothing to rename.\n".to_string(),
            None => format!("No changes applied ({} renames planned).\n", self.renames),
        }
    }
}

impl OutputFormatter for UndoResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.outcome.success,
            "operation": "undo",
            "outcome": self.outcome,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.outcome.success {
            format!(
                "✓ Restored {} files to their previous names\n",
                self.outcome.renamed_count
            )
        } else {
            format_outcome(&self.outcome)
        }
    }
}

impl OutputFormatter for VersionResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

fn format_outcome(outcome: &RenameOutcome) -> String {
    let mut output = String::new();

    if outcome.success {
        writeln!(output, "✓ {}", outcome.message).unwrap();
        return output;
    }

    writeln!(output, "✗ {}", outcome.message).unwrap();
    for error in &outcome.errors {
        writeln!(output, "  {}", error).unwrap();
    }
    if !outcome.rollback_errors.is_empty() {
        writeln!(output, "Rollback was incomplete:").unwrap();
        for error in &outcome.rollback_errors {
            writeln!(output, "  {}", error).unwrap();
        }
    }

    output
}
