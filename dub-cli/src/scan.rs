use anyhow::Result;
use dub_core::{scan_operation, OutputFormatter};

use crate::cli::{OutputFormat, SelectionArgs};

pub fn handle_scan(selection: &SelectionArgs, output: OutputFormat) -> Result<()> {
    let result = scan_operation(&selection.dir, selection.pattern.as_deref())?;
    print!("{}", result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
