use anyhow::Result;
use dub_core::{undo_operation, OutputFormatter};

use crate::cli::OutputFormat;
use crate::BatchFailed;

pub fn handle_undo(write_log: bool, output: OutputFormat, quiet: bool) -> Result<()> {
    let result = undo_operation(write_log, None)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    if !result.outcome.success {
        return Err(BatchFailed::from_outcome("undo", &result.outcome).into());
    }

    Ok(())
}
