use super::apply::execute_batch;
use super::plan::{build_plan, PlanRequest};
use super::PlanFile;
use crate::config::STATE_DIR;
use crate::lock::LockFile;
use crate::output::RenameResult;
use crate::plan::{conflict_count, pending_count, RenamePlanEntry};
use crate::preview::{render_plan, Preview};
use anyhow::{anyhow, Context, Result};
use std::io::{self, IsTerminal, Write as IoWrite};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct RenameOptions {
    pub preview: Preview,
    pub dry_run: bool,
    pub auto_approve: bool,
    pub use_color: bool,
    pub write_log: bool,
}

/// High-level rename operation - equivalent to `dub rename` command
///
/// Plans, shows the preview, asks for confirmation and applies in one step.
/// Returns the preview text when the caller still has to print it.
pub fn rename_operation(
    request: &PlanRequest,
    options: &RenameOptions,
    working_dir: Option<&Path>,
) -> Result<(RenameResult, Option<String>)> {
    let current_dir = working_dir.unwrap_or_else(|| Path::new("."));
    let state_dir = current_dir.join(STATE_DIR);

    let _lock = LockFile::acquire(&state_dir).context("Failed to acquire lock for rename")?;

    let (directory, plan) = build_plan(request)?;
    let renames = pending_count(&plan);
    let conflicts = conflict_count(&plan);

    let mut preview_output = None;
    if options.preview != Preview::None {
        let preview = render_plan(&plan, options.preview, Some(options.use_color));

        // Print preview BEFORE asking for confirmation
        if !options.dry_run && !options.auto_approve && renames > 0 {
            println!("{}", preview);
        } else {
            preview_output = Some(preview);
        }
    }

    let unapplied = |plan: Vec<RenamePlanEntry>| RenameResult {
        renames,
        conflicts,
        applied: false,
        outcome: None,
        plan,
    };

    if options.dry_run || renames == 0 {
        return Ok((unapplied(plan), preview_output));
    }

    if !options.auto_approve {
        if !io::stdout().is_terminal() {
            return Err(anyhow!(
                "Cannot prompt for confirmation in non-interactive mode. Use --yes to apply."
            ));
        }
        if !get_user_confirmation()? {
            return Ok((unapplied(plan), Some("Aborted.".to_string())));
        }
    }

    let batch = PlanFile::new(directory, plan);
    let applied = execute_batch(&batch, &state_dir, options.write_log)?;

    Ok((
        RenameResult {
            renames,
            conflicts,
            applied: applied.outcome.success,
            outcome: Some(applied.outcome),
            plan: batch.entries,
        },
        preview_output,
    ))
}

fn get_user_confirmation() -> Result<bool> {
    print!("Apply? [y/N]: ");
    IoWrite::flush(&mut io::stdout()).context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
