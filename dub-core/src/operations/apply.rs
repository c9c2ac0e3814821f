use super::{PlanFile, APPLY_LOG, LAST_BATCH_FILE, PLAN_FILE};
use crate::config::STATE_DIR;
use crate::execute::{execute_plan_with_options, ExecuteOptions};
use crate::fs::OsFileSystem;
use crate::lock::LockFile;
use crate::output::ApplyResult;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// High-level apply operation - equivalent to `dub apply` command
///
/// Executes the plan at `plan_path`, or the pending `.dub/plan.json` when no
/// path is given. The default plan file is removed once it has been applied.
pub fn apply_operation(
    plan_path: Option<PathBuf>,
    write_log: bool,
    working_dir: Option<&Path>,
) -> Result<ApplyResult> {
    let current_dir = working_dir.unwrap_or_else(|| Path::new("."));
    let state_dir = current_dir.join(STATE_DIR);

    let _lock = LockFile::acquire(&state_dir).context("Failed to acquire lock for apply")?;

    // Explicit plan paths belong to the caller and are never deleted
    let (plan_path, is_default) = match plan_path {
        Some(path) => (path, false),
        None => (state_dir.join(PLAN_FILE), true),
    };
    if is_default && !plan_path.exists() {
        anyhow::bail!("No pending plan found. Run 'dub plan' first.");
    }
    let plan = PlanFile::load(&plan_path)?;

    let result = execute_batch(&plan, &state_dir, write_log)?;

    if is_default && result.outcome.success {
        if let Err(e) = fs::remove_file(&plan_path) {
            eprintln!(
                "Warning: Failed to delete plan file {}: {}",
                plan_path.display(),
                e
            );
        }
    }

    Ok(result)
}

/// Execute a plan against the real filesystem and record it for undo.
/// The caller holds the state directory lock.
pub(crate) fn execute_batch(
    plan: &PlanFile,
    state_dir: &Path,
    write_log: bool,
) -> Result<ApplyResult> {
    let log_file = write_log.then(|| state_dir.join(APPLY_LOG));
    let options = ExecuteOptions {
        log_file: log_file.clone(),
    };

    let outcome = execute_plan_with_options(&OsFileSystem, &plan.entries, &options)
        .context("Failed to open apply log")?;

    if outcome.success && outcome.renamed_count > 0 {
        plan.save(&state_dir.join(LAST_BATCH_FILE))
            .context("Renames succeeded but the batch could not be saved for undo")?;
    }

    Ok(ApplyResult {
        outcome,
        log_file: log_file.map(|p| p.display().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{plan_operation, NameSource, PlanRequest};
    use tempfile::TempDir;

    fn plan_in(dir: &Path, names: &[&str]) {
        plan_operation(&PlanRequest {
            directory: dir.to_path_buf(),
            pattern: None,
            source: NameSource::Names(names.iter().map(ToString::to_string).collect()),
            plan_out: Some(dir.join(STATE_DIR).join(PLAN_FILE)),
        })
        .unwrap();
    }

    #[test]
    fn test_apply_default_plan() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        plan_in(temp_dir.path(), &["first", "second"]);

        let result = apply_operation(None, true, Some(temp_dir.path())).unwrap();

        assert!(result.outcome.success);
        assert_eq!(result.outcome.renamed_count, 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("first.txt")).unwrap(),
            "a"
        );
        assert!(!temp_dir.path().join("a.txt").exists());

        let state_dir = temp_dir.path().join(STATE_DIR);
        assert!(!state_dir.join(PLAN_FILE).exists());
        assert!(state_dir.join(LAST_BATCH_FILE).exists());
        let log = fs::read_to_string(state_dir.join(APPLY_LOG)).unwrap();
        assert!(log.contains("Renamed 2 files"));
    }

    #[test]
    fn test_apply_without_pending_plan() {
        let temp_dir = TempDir::new().unwrap();
        let err = apply_operation(None, false, Some(temp_dir.path())).unwrap_err();
        assert!(err.to_string().contains("No pending plan"));
    }

    #[test]
    fn test_apply_explicit_plan_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        let plan_path = temp_dir.path().join("my-plan.json");
        plan_operation(&PlanRequest {
            directory: temp_dir.path().to_path_buf(),
            pattern: None,
            source: NameSource::Names(vec!["z".to_string()]),
            plan_out: Some(plan_path.clone()),
        })
        .unwrap();

        let result = apply_operation(Some(plan_path.clone()), false, Some(temp_dir.path())).unwrap();

        assert!(result.outcome.success);
        assert!(result.log_file.is_none());
        assert!(plan_path.exists());
        assert!(temp_dir.path().join("z.txt").exists());
    }

    #[test]
    fn test_apply_rejects_plan_moving_files_out_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let photos = temp_dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(photos.join("a.txt"), "a").unwrap();

        let plan_path = temp_dir.path().join("edited-plan.json");
        plan_operation(&PlanRequest {
            directory: photos.clone(),
            pattern: None,
            source: NameSource::Names(vec!["escaped".to_string()]),
            plan_out: Some(plan_path.clone()),
        })
        .unwrap();

        let mut plan: PlanFile =
            serde_json::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
        plan.entries[0].new_path = temp_dir.path().join("escaped.txt");
        plan.save(&plan_path).unwrap();

        let err = apply_operation(Some(plan_path), false, Some(temp_dir.path())).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<crate::error::DubError>(),
            Some(crate::error::DubError::InvalidFileName { .. })
        ));
        assert!(photos.join("a.txt").exists());
        assert!(!temp_dir.path().join("escaped.txt").exists());
        assert!(!temp_dir.path().join(STATE_DIR).join(LAST_BATCH_FILE).exists());
    }

    #[test]
    fn test_apply_failure_rolls_back_and_keeps_plan() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }
        plan_in(temp_dir.path(), &["x", "y", "z"]);

        // Occupy the second target after planning so its rename is refused
        fs::write(temp_dir.path().join("y.txt"), "blocker").unwrap();

        let result = apply_operation(None, false, Some(temp_dir.path())).unwrap();

        assert!(!result.outcome.success);
        assert!(result.outcome.rolled_back);
        assert_eq!(result.outcome.renamed_count, 0);
        assert!(temp_dir.path().join("a.txt").exists());
        assert!(!temp_dir.path().join("x.txt").exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("y.txt")).unwrap(),
            "blocker"
        );

        let state_dir = temp_dir.path().join(STATE_DIR);
        assert!(state_dir.join(PLAN_FILE).exists());
        assert!(!state_dir.join(LAST_BATCH_FILE).exists());
    }
}
