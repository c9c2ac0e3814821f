use crate::error::Result;
use crate::fs::FileSystem;
use crate::plan::{reverse_plan, RenamePlanEntry};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for executing a rename plan
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Append a timestamped line per step to this file
    pub log_file: Option<PathBuf>,
}

/// Result of one execute call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub success: bool,
    pub renamed_count: usize,
    pub message: String,
    pub errors: Vec<String>,
    pub rolled_back: bool,
    pub rollback_errors: Vec<String>,
}

/// Tracks the renames performed so far by one execute call
struct ExecuteState {
    completed: Vec<(PathBuf, PathBuf)>,
    log_file: Option<File>,
}

impl ExecuteState {
    fn new(log_file: Option<&Path>) -> Result<Self> {
        let log_file = match log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                Some(OpenOptions::new().create(true).append(true).open(path)?)
            },
            None => None,
        };

        Ok(Self {
            completed: Vec::new(),
            log_file,
        })
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.log_file {
            // A broken log must not interrupt a batch that is half applied
            let _ = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            );
        }
    }
}

/// Execute `plan` in order, skipping conflicting and unchanged entries.
///
/// Stops at the first failed rename and renames everything already done back
/// to its original path, newest first.
pub fn execute_plan(fs: &dyn FileSystem, plan: &[RenamePlanEntry]) -> RenameOutcome {
    let mut state = ExecuteState {
        completed: Vec::new(),
        log_file: None,
    };
    run(fs, plan, &mut state)
}

/// Like [`execute_plan`], with a log file. Fails only if the log cannot be
/// opened, before any file is touched.
pub fn execute_plan_with_options(
    fs: &dyn FileSystem,
    plan: &[RenamePlanEntry],
    options: &ExecuteOptions,
) -> Result<RenameOutcome> {
    let mut state = ExecuteState::new(options.log_file.as_deref())?;
    Ok(run(fs, plan, &mut state))
}

/// Rename every file of an executed plan back to its original name.
pub fn undo_plan(fs: &dyn FileSystem, executed: &[RenamePlanEntry]) -> RenameOutcome {
    execute_plan(fs, &reverse_plan(executed))
}

fn run(fs: &dyn FileSystem, plan: &[RenamePlanEntry], state: &mut ExecuteState) -> RenameOutcome {
    state.log(&format!("Starting batch of {} entries", plan.len()));

    for entry in plan {
        if entry.conflict {
            state.log(&format!("Skipping conflicting entry {}", entry.original_name));
            continue;
        }
        if entry.is_inert() {
            continue;
        }

        if let Err(error) = rename_entry(fs, entry, state) {
            state.log(&error);
            let rollback_errors = rollback(fs, state);
            return failure(error, rollback_errors);
        }
    }

    let renamed_count = state.completed.len();
    state.log(&format!("Renamed {renamed_count} files"));
    RenameOutcome {
        success: true,
        renamed_count,
        message: format!("Successfully renamed {renamed_count} files"),
        errors: Vec::new(),
        rolled_back: false,
        rollback_errors: Vec::new(),
    }
}

fn rename_entry(
    fs: &dyn FileSystem,
    entry: &RenamePlanEntry,
    state: &mut ExecuteState,
) -> Result<(), String> {
    let from = &entry.original_path;
    let to = &entry.new_path;

    if target_taken(fs, from, to) {
        return Err(format!(
            "failed to rename {:?}: target {:?} already exists",
            entry.original_name, entry.new_name
        ));
    }

    state.log(&format!("Renaming {} -> {}", from.display(), to.display()));
    fs.rename(from, to)
        .map_err(|e| format!("failed to rename {:?}: {}", entry.original_name, e))?;
    state.completed.push((from.clone(), to.clone()));
    Ok(())
}

fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from != to && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

/// Whether `to` names a file other than `from`.
///
/// On case-insensitive filesystems stat of a case-only target finds the
/// source itself, so those targets only count as taken when the directory
/// lists an entry spelled exactly like them.
fn target_taken(fs: &dyn FileSystem, from: &Path, to: &Path) -> bool {
    if !is_case_only_change(from, to) {
        return fs.stat(to).is_ok();
    }

    let (Some(dir), Some(target)) = (to.parent(), to.file_name()) else {
        return true;
    };
    let target = target.to_string_lossy();
    match fs.read_dir(dir) {
        Ok(entries) => entries.iter().any(|e| e.name == target),
        // An unlistable directory counts as taken
        Err(_) => true,
    }
}

/// Undo completed renames newest first. Keeps going past failures so as
/// much as possible is restored.
fn rollback(fs: &dyn FileSystem, state: &mut ExecuteState) -> Vec<String> {
    state.log("Starting rollback due to error");

    let mut errors = Vec::new();
    let completed: Vec<_> = state.completed.drain(..).rev().collect();
    for (from, to) in completed {
        state.log(&format!(
            "Reverting rename: {} -> {}",
            to.display(),
            from.display()
        ));
        if let Err(e) = fs.rename(&to, &from) {
            let message = format!(
                "failed to revert rename {} -> {}: {}",
                to.display(),
                from.display(),
                e
            );
            state.log(&message);
            errors.push(message);
        }
    }

    if errors.is_empty() {
        state.log("Rollback completed successfully");
    }
    errors
}

fn failure(error: String, rollback_errors: Vec<String>) -> RenameOutcome {
    let message = if rollback_errors.is_empty() {
        "Rename failed; all completed renames were rolled back".to_string()
    } else {
        format!(
            "Rename failed and {} renames could not be rolled back; inspect the directory manually",
            rollback_errors.len()
        )
    };

    RenameOutcome {
        success: false,
        renamed_count: 0,
        message,
        errors: vec![error],
        rolled_back: true,
        rollback_errors,
    }
}
