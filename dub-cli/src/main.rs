use anyhow::{Context, Result};
use clap::Parser;
use dub_core::{Config, DubError, OutputFormatter, Preview, RenameOutcome, VersionResult};
use std::io::{self, IsTerminal};
use std::process;
use std::str::FromStr;

mod apply;
mod cli;
mod plan;
mod rename;
mod scan;
mod undo;

use cli::{Cli, Commands, OutputFormat, PreviewArg};

/// A batch ran, failed part-way and was rolled back. Reported after the
/// outcome has been printed so the exit status reflects it.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct BatchFailed {
    operation: &'static str,
    message: String,
}

impl BatchFailed {
    pub fn from_outcome(operation: &'static str, outcome: &RenameOutcome) -> Self {
        Self {
            operation,
            message: outcome
                .errors
                .first()
                .cloned()
                .unwrap_or_else(|| outcome.message.clone()),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: ignoring unreadable config: {e:#}");
        Config::default()
    });

    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());
    let write_log = config.defaults.write_log;

    let result = match cli.command {
        Commands::Scan { selection, output } => scan::handle_scan(&selection, output),

        Commands::Plan {
            selection,
            naming,
            preview,
            plan_out,
            dry_run,
            output,
            quiet,
        } => plan::handle_plan(
            selection,
            naming,
            &config.defaults.template,
            resolve_preview(preview, &config),
            plan_out,
            dry_run,
            output,
            quiet,
            use_color,
        ),

        Commands::Apply {
            plan,
            output,
            quiet,
        } => apply::handle_apply(plan, write_log, output, quiet),

        Commands::Rename {
            selection,
            naming,
            preview,
            dry_run,
            output,
            quiet,
        } => rename::handle_rename(
            selection,
            naming,
            &config.defaults.template,
            resolve_preview(preview, &config),
            dry_run,
            cli.yes,
            write_log,
            output,
            quiet,
            use_color,
        ),

        Commands::Undo { output, quiet } => undo::handle_undo(write_log, output, quiet),

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// Use preview format from CLI arg or config default
fn resolve_preview(arg: Option<PreviewArg>, config: &Config) -> Preview {
    arg.map(Into::into).unwrap_or_else(|| {
        Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table)
    })
}

/// 1 for a failed and rolled back batch, 2 for invalid input, 3 otherwise
fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<BatchFailed>().is_some() {
        return 1;
    }

    match error.downcast_ref::<DubError>() {
        Some(
            DubError::InvalidPath { .. }
            | DubError::InvalidPattern { .. }
            | DubError::MismatchedNames { .. }
            | DubError::InvalidFileName { .. },
        ) => 2,
        _ => 3,
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "dub".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
