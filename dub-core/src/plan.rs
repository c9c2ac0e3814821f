use crate::diff::{compute_diff, DiffSegment};
use crate::error::{DubError, Result};
use crate::scanner::FileEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One proposed rename. Entries flagged `conflict` are never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlanEntry {
    pub original_name: String,
    pub new_name: String,
    pub original_path: PathBuf,
    pub new_path: PathBuf,
    pub conflict: bool,
    /// Equal/Delete segments over `original_name`; empty when unchanged.
    #[serde(default)]
    pub original_diff: Vec<DiffSegment>,
    /// Equal/Insert segments over `new_name`; empty when unchanged.
    #[serde(default)]
    pub new_diff: Vec<DiffSegment>,
}

impl RenamePlanEntry {
    /// Source and target are the same path, so there is nothing to do.
    pub fn is_inert(&self) -> bool {
        self.original_path == self.new_path
    }

    /// Whether executing the plan would touch this entry.
    pub fn is_pending(&self) -> bool {
        !self.conflict && !self.is_inert()
    }
}

/// Build a rename plan pairing each file with the desired name at the same
/// position.
///
/// Names are trimmed; an empty name keeps the original file name. The file's
/// extension is appended unless the name already ends with it. Any changed
/// name that could escape the directory aborts the whole plan. Every entry
/// whose new name collides case-insensitively with another is flagged.
pub fn plan_renames(files: &[FileEntry], names: &[String]) -> Result<Vec<RenamePlanEntry>> {
    if files.len() != names.len() {
        return Err(DubError::MismatchedNames {
            files: files.len(),
            names: names.len(),
        });
    }

    let mut plan = Vec::with_capacity(files.len());
    for (file, desired) in files.iter().zip(names) {
        let new_name = resolve_new_name(file, desired);
        if new_name != file.name {
            validate_file_name(&new_name)?;
        }

        let dir = file.path.parent().unwrap_or_else(|| Path::new(""));
        plan.push(RenamePlanEntry {
            original_name: file.name.clone(),
            new_path: dir.join(&new_name),
            new_name,
            original_path: file.path.clone(),
            conflict: false,
            original_diff: Vec::new(),
            new_diff: Vec::new(),
        });
    }

    mark_conflicts(&mut plan);

    for entry in &mut plan {
        if entry.new_name != entry.original_name {
            let (old, new) = compute_diff(&entry.original_name, &entry.new_name);
            entry.original_diff = old;
            entry.new_diff = new;
        }
    }

    Ok(plan)
}

fn resolve_new_name(file: &FileEntry, desired: &str) -> String {
    let trimmed = desired.trim();
    if trimmed.is_empty() {
        return file.name.clone();
    }
    if !file.extension.is_empty() && !trimmed.to_lowercase().ends_with(&file.extension) {
        return format!("{trimmed}{}", file.extension);
    }
    trimmed.to_string()
}

/// Reject names that could move the file out of its directory.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.contains("..") || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(DubError::InvalidFileName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Re-check a plan that was stored and loaded back.
///
/// Conflict flags are recomputed. Every pending entry must carry a valid new
/// name and a target in the same directory as its source, otherwise the whole
/// plan is rejected.
pub fn verify_plan(plan: &mut [RenamePlanEntry]) -> Result<()> {
    mark_conflicts(plan);

    for entry in plan.iter().filter(|e| e.is_pending()) {
        validate_file_name(&entry.new_name)?;
        let expected = entry
            .original_path
            .parent()
            .map(|dir| dir.join(&entry.new_name));
        if expected.as_deref() != Some(entry.new_path.as_path()) {
            return Err(DubError::InvalidFileName {
                name: entry.new_path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Flag every entry whose new name occurs more than once, ignoring case.
/// All members of a colliding group are flagged, not just the later ones.
fn mark_conflicts(plan: &mut [RenamePlanEntry]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in plan.iter() {
        *counts.entry(entry.new_name.to_lowercase()).or_insert(0) += 1;
    }
    for entry in plan.iter_mut() {
        entry.conflict = counts[&entry.new_name.to_lowercase()] > 1;
    }
}

/// Build the plan that undoes `plan`: names, paths and diff sides are
/// swapped, and entries run in reverse order so chained renames unwind.
pub fn reverse_plan(plan: &[RenamePlanEntry]) -> Vec<RenamePlanEntry> {
    plan.iter()
        .rev()
        .map(|entry| RenamePlanEntry {
            original_name: entry.new_name.clone(),
            new_name: entry.original_name.clone(),
            original_path: entry.new_path.clone(),
            new_path: entry.original_path.clone(),
            conflict: entry.conflict,
            original_diff: flip_segments(&entry.new_diff),
            new_diff: flip_segments(&entry.original_diff),
        })
        .collect()
}

fn flip_segments(segments: &[DiffSegment]) -> Vec<DiffSegment> {
    use crate::diff::DiffKind;
    segments
        .iter()
        .map(|s| {
            let kind = match s.kind {
                DiffKind::Equal => DiffKind::Equal,
                DiffKind::Delete => DiffKind::Insert,
                DiffKind::Insert => DiffKind::Delete,
            };
            DiffSegment::new(s.text.clone(), kind)
        })
        .collect()
}

/// Count entries that execution would rename.
pub fn pending_count(plan: &[RenamePlanEntry]) -> usize {
    plan.iter().filter(|e| e.is_pending()).count()
}

/// Count entries flagged as conflicting.
pub fn conflict_count(plan: &[RenamePlanEntry]) -> usize {
    plan.iter().filter(|e| e.conflict).count()
}
