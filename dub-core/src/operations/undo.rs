use super::{PlanFile, APPLY_LOG, LAST_BATCH_FILE};
use crate::config::STATE_DIR;
use crate::execute::{execute_plan_with_options, ExecuteOptions};
use crate::fs::OsFileSystem;
use crate::lock::LockFile;
use crate::output::UndoResult;
use crate::plan::reverse_plan;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// High-level undo operation - equivalent to `dub undo` command
///
/// Reverts the last successfully applied batch. The batch record is removed
/// once it has been undone, so a second undo reports that there is nothing
/// left to revert.
pub fn undo_operation(write_log: bool, working_dir: Option<&Path>) -> Result<UndoResult> {
    let current_dir = working_dir.unwrap_or_else(|| Path::new("."));
    let state_dir = current_dir.join(STATE_DIR);

    let _lock = LockFile::acquire(&state_dir).context("Failed to acquire lock for undo")?;

    let batch_path = state_dir.join(LAST_BATCH_FILE);
    if !batch_path.exists() {
        anyhow::bail!("Nothing to undo: no applied batch was found");
    }
    let batch = PlanFile::load(&batch_path)?;

    let options = ExecuteOptions {
        log_file: write_log.then(|| state_dir.join(APPLY_LOG)),
    };
    let outcome = execute_plan_with_options(&OsFileSystem, &reverse_plan(&batch.entries), &options)
        .context("Failed to open apply log")?;

    if outcome.success {
        fs::remove_file(&batch_path)
            .with_context(|| format!("Failed to remove {}", batch_path.display()))?;
    }

    Ok(UndoResult { outcome })
}
