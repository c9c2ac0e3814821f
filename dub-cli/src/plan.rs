use anyhow::Result;
use dub_core::{plan_operation, render_plan, OutputFormatter, PlanRequest, Preview};
use std::path::PathBuf;

use crate::cli::{NamingArgs, OutputFormat, SelectionArgs};

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    selection: SelectionArgs,
    naming: NamingArgs,
    default_template: &str,
    preview: Preview,
    plan_out: PathBuf,
    dry_run: bool,
    output: OutputFormat,
    quiet: bool,
    use_color: bool,
) -> Result<()> {
    let request = PlanRequest {
        directory: selection.dir,
        pattern: selection.pattern,
        source: naming.into_source(default_template),
        plan_out: (!dry_run).then_some(plan_out),
    };

    let result = plan_operation(&request)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if quiet {
                return Ok(());
            }
            if preview != Preview::None {
                println!("{}", render_plan(&result.plan, preview, Some(use_color)));
            }
            print!("{}", result.format_summary());
        },
    }

    Ok(())
}
