use anyhow::Result;
use dub_core::{apply_operation, OutputFormatter};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::BatchFailed;

pub fn handle_apply(
    plan: Option<PathBuf>,
    write_log: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let result = apply_operation(plan, write_log, None)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    if !result.outcome.success {
        return Err(BatchFailed::from_outcome("apply", &result.outcome).into());
    }

    Ok(())
}
