//! High-level operations that correspond to CLI commands
//!
//! These modules hold the business logic for each dub command, separated
//! from argument parsing and terminal output. They work against the real
//! filesystem and keep their state in `.dub/` under the working directory.

pub mod apply;
pub mod plan;
pub mod rename;
pub mod scan;
pub mod undo;

pub use apply::apply_operation;
pub use plan::{plan_operation, NameSource, PlanRequest};
pub use rename::{rename_operation, RenameOptions};
pub use scan::scan_operation;
pub use undo::undo_operation;

use crate::plan::{verify_plan, RenamePlanEntry};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Pending plan written by `dub plan`
pub const PLAN_FILE: &str = "plan.json";
/// Last successfully executed batch, consumed by `dub undo`
pub const LAST_BATCH_FILE: &str = "last_batch.json";
/// Execution log, relative to the state directory
pub const APPLY_LOG: &str = "logs/apply.log";

/// A rename plan as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub created_at: DateTime<Local>,
    pub directory: PathBuf,
    pub entries: Vec<RenamePlanEntry>,
}

impl PlanFile {
    pub fn new(directory: PathBuf, entries: Vec<RenamePlanEntry>) -> Self {
        Self {
            created_at: Local::now(),
            directory,
            entries,
        }
    }

    /// Read a stored plan and re-check its entries before anything runs it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan from {}", path.display()))?;
        let mut plan: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plan from {}", path.display()))?;
        verify_plan(&mut plan.entries)?;
        Ok(plan)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize plan")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write plan to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_renames;
    use crate::scanner::FileEntry;
    use tempfile::TempDir;

    #[test]
    fn test_plan_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".dub").join(PLAN_FILE);

        let files = vec![FileEntry::for_name("a.txt")];
        let entries = plan_renames(&files, &["b".to_string()]).unwrap();
        PlanFile::new(PathBuf::from("/dir"), entries.clone())
            .save(&path)
            .unwrap();

        let loaded = PlanFile::load(&path).unwrap();
        assert_eq!(loaded.directory, PathBuf::from("/dir"));
        assert_eq!(loaded.entries, entries);
    }

    #[test]
    fn test_plan_file_load_rejects_moved_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PLAN_FILE);

        let files = vec![FileEntry::for_name("a.txt")];
        let mut entries = plan_renames(&files, &["b".to_string()]).unwrap();
        entries[0].new_path = PathBuf::from("/other/b.txt");
        PlanFile::new(PathBuf::from("/dir"), entries).save(&path).unwrap();

        let err = PlanFile::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::DubError>(),
            Some(crate::error::DubError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn test_plan_file_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = PlanFile::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read plan"));
    }
}
