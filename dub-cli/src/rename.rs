use anyhow::Result;
use dub_core::{rename_operation, OutputFormatter, PlanRequest, Preview, RenameOptions};

use crate::cli::{NamingArgs, OutputFormat, SelectionArgs};
use crate::BatchFailed;

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    selection: SelectionArgs,
    naming: NamingArgs,
    default_template: &str,
    preview: Preview,
    dry_run: bool,
    auto_approve: bool,
    write_log: bool,
    output: OutputFormat,
    quiet: bool,
    use_color: bool,
) -> Result<()> {
    let request = PlanRequest {
        directory: selection.dir,
        pattern: selection.pattern,
        source: naming.into_source(default_template),
        plan_out: None,
    };

    let options = RenameOptions {
        // JSON output carries the plan itself
        preview: if output == OutputFormat::Json || quiet {
            Preview::None
        } else {
            preview
        },
        dry_run,
        auto_approve,
        use_color,
        write_log,
    };

    let (result, preview_output) = rename_operation(&request, &options, None)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !quiet {
                if let Some(preview) = preview_output {
                    println!("{}", preview);
                }
                print!("{}", result.format_summary());
            }
        },
    }

    if let Some(outcome) = result.outcome.as_ref().filter(|o| !o.success) {
        return Err(BatchFailed::from_outcome("rename", outcome).into());
    }

    Ok(())
}
