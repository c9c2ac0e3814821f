use crate::error::Result;
use crate::fs::FileSystem;
use crate::natural::natural_sort;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file as seen at scan time. Not kept in sync with the disk afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    /// Lowercased, with the leading dot, or empty when the name has none.
    pub extension: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Local>,
}

impl FileEntry {
    /// Build an entry from its full path, deriving the name and extension.
    pub fn from_path(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        modified_at: DateTime<Local>,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&name);
        Self {
            name,
            path,
            extension,
            size_bytes,
            modified_at,
        }
    }

    /// The name without its extension. The extension is matched
    /// case-insensitively, so `IMG.JPG` has the stem `IMG`.
    pub fn stem(&self) -> &str {
        if self.extension.is_empty() {
            return &self.name;
        }
        let cut = self.name.len().saturating_sub(self.extension.len());
        match self.name.get(cut..) {
            Some(tail) if tail.to_lowercase() == self.extension => &self.name[..cut],
            _ => &self.name,
        }
    }

    /// Base name of the directory holding this file, or empty at the root.
    pub fn parent_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn for_name(name: &str) -> Self {
        Self::from_path(Path::new("/dir").join(name), 0, Local::now())
    }
}

/// Lowercased text from the last dot to the end of the name, or empty when
/// there is no dot. A dotfile such as `.bashrc` is all extension.
pub fn extension_of(name: &str) -> String {
    name.rfind('.')
        .map(|dot| name[dot..].to_lowercase())
        .unwrap_or_default()
}

/// List the files directly inside `dir`, skipping subdirectories, in natural
/// order. Entries whose metadata cannot be read are skipped.
pub fn scan_directory(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<FileEntry>> {
    let entries = fs.read_dir(dir)?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_dir {
            continue;
        }

        let path = dir.join(&entry.name);
        let Ok(info) = fs.stat(&path) else {
            continue;
        };
        if info.is_dir {
            continue;
        }

        files.push(FileEntry {
            extension: extension_of(&entry.name),
            name: entry.name,
            path,
            size_bytes: info.size_bytes,
            modified_at: info.modified_at,
        });
    }

    natural_sort(&mut files);
    Ok(files)
}
