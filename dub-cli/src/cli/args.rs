use clap::{Args, Parser, Subcommand};
use dub_core::NameSource;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Batch rename files with templates, patterns, previews and undo
#[derive(Parser, Debug)]
#[command(name = "dub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "DUB_YES")]
    pub yes: bool,
}

/// Which files take part in a batch
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Directory whose files are renamed (not recursive)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Only include files whose name without extension matches this regex.
    /// Shortcuts: [serial] [number] [any] [word] [alpha]
    #[arg(short = 'm', long = "match", value_name = "PATTERN", verbatim_doc_comment)]
    pub pattern: Option<String>,
}

/// Where the new names come from
#[derive(Args, Debug, Clone)]
pub struct NamingArgs {
    /// Naming template, e.g. "IMG_{date:%Y%m%d}_{index:3}".
    /// Tokens: {index[:width]} {date[:format]} {original} {ext} {parent},
    /// optional pipe: |upper |lower |title
    #[arg(
        short = 't',
        long,
        conflicts_with_all = ["find", "names_file", "names", "name"],
        verbatim_doc_comment
    )]
    pub template: Option<String>,

    /// Regex to search for in each file name (without extension)
    #[arg(long, requires = "replace", conflicts_with_all = ["names_file", "names", "name"])]
    pub find: Option<String>,

    /// Replacement for --find; may use $1 or ${name} capture references
    #[arg(long, requires = "find")]
    pub replace: Option<String>,

    /// File with one new name per line, in file order
    #[arg(long, value_name = "FILE", conflicts_with_all = ["names", "name"])]
    pub names_file: Option<PathBuf>,

    /// New names, comma separated, in file order.
    /// Use --name or --names-file for names containing commas
    #[arg(long, value_delimiter = ',', conflicts_with = "name", verbatim_doc_comment)]
    pub names: Vec<String>,

    /// One new name, taken as is; repeat once per file in file order
    #[arg(long, value_name = "NAME")]
    pub name: Vec<String>,
}

impl NamingArgs {
    /// Pick the naming source, falling back to `default_template`.
    pub fn into_source(self, default_template: &str) -> NameSource {
        if let Some(template) = self.template {
            NameSource::Template(template)
        } else if let (Some(search), Some(replace)) = (self.find, self.replace) {
            NameSource::FindReplace { search, replace }
        } else if let Some(path) = self.names_file {
            NameSource::NamesFile(path)
        } else if !self.names.is_empty() {
            NameSource::Names(self.names)
        } else if !self.name.is_empty() {
            NameSource::Names(self.name)
        } else {
            NameSource::Template(default_template.to_string())
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files a batch would act on, in natural order
    Scan {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Generate a rename plan without changing any files
    Plan {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        naming: NamingArgs,

        /// Preview format (defaults to the config's preview_format)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Where to write the plan
        #[arg(long, default_value = ".dub/plan.json")]
        plan_out: PathBuf,

        /// Only show the preview, don't write a plan file
        #[arg(long)]
        dry_run: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Execute a previously generated plan
    Apply {
        /// Path to the plan (defaults to .dub/plan.json)
        plan: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long)]
        quiet: bool,
    },

    /// Plan, confirm and apply in one step
    Rename {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        naming: NamingArgs,

        /// Preview format (defaults to the config's preview_format)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show the preview and stop
        #[arg(long)]
        dry_run: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Revert the last applied batch
    Undo {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long)]
        quiet: bool,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
