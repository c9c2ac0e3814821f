use super::PlanFile;
use crate::error::DubError;
use crate::find_replace::find_replace;
use crate::fs::{FileSystem, OsFileSystem};
use crate::names::read_names_file;
use crate::output::PlanResult;
use crate::pattern::{filter_files, RegexMatcher};
use crate::plan::{conflict_count, pending_count, plan_renames, RenamePlanEntry};
use crate::scanner::{scan_directory, FileEntry};
use crate::template::expand_names;
use anyhow::Result;
use std::path::PathBuf;

/// Where the new names come from. Exactly one source drives a plan.
#[derive(Debug, Clone)]
pub enum NameSource {
    /// Expand a naming template per file
    Template(String),
    /// Regex find/replace over each file's stem
    FindReplace { search: String, replace: String },
    /// One name per line, in file order
    NamesFile(PathBuf),
    /// Names given directly, in file order
    Names(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub directory: PathBuf,
    /// Only files whose stem matches this pattern take part
    pub pattern: Option<String>,
    pub source: NameSource,
    /// Write the plan here when set
    pub plan_out: Option<PathBuf>,
}

/// High-level plan operation - equivalent to `dub plan` command
pub fn plan_operation(request: &PlanRequest) -> Result<PlanResult> {
    let (directory, plan) = build_plan(request)?;

    let plan_path = match &request.plan_out {
        Some(path) => {
            PlanFile::new(directory.clone(), plan.clone()).save(path)?;
            Some(path.display().to_string())
        },
        None => None,
    };

    Ok(PlanResult {
        directory: directory.display().to_string(),
        entries: plan.len(),
        renames: pending_count(&plan),
        conflicts: conflict_count(&plan),
        plan_path,
        plan,
    })
}

/// Scan, filter and preview. Returns the resolved directory with the plan.
pub(crate) fn build_plan(request: &PlanRequest) -> Result<(PathBuf, Vec<RenamePlanEntry>)> {
    let fs = OsFileSystem;

    // Absolute paths keep the saved plan valid from any working directory
    let directory = std::fs::canonicalize(&request.directory)
        .map_err(|e| DubError::invalid_path(&request.directory, e))?;

    let files = scan_directory(&fs, &directory)?;
    let files = match request.pattern.as_deref() {
        Some(pattern) => filter_files(&RegexMatcher::new(), &files, pattern)?,
        None => files,
    };

    let names = resolve_names(&fs, &request.source, &files)?;
    let plan = plan_renames(&files, &names)?;
    Ok((directory, plan))
}

fn resolve_names(
    fs: &dyn FileSystem,
    source: &NameSource,
    files: &[FileEntry],
) -> Result<Vec<String>> {
    let names = match source {
        NameSource::Template(template) => expand_names(template, files),
        NameSource::FindReplace { search, replace } => find_replace(files, search, replace)?,
        NameSource::NamesFile(path) => read_names_file(fs, path)?,
        NameSource::Names(names) => names.clone(),
    };
    Ok(names)
}
