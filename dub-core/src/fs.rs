//! Filesystem port used by the scanner and the executor.
//!
//! [`OsFileSystem`] talks to the real filesystem. [`MemoryFileSystem`] keeps
//! files in a map and can be told to fail specific renames, which is how the
//! rollback paths are exercised without touching the disk.

use crate::error::{DubError, Result};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Metadata returned by [`FileSystem::stat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub is_dir: bool,
    pub size_bytes: u64,
    pub modified_at: DateTime<Local>,
}

pub trait FileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
    fn stat(&self, path: &Path) -> Result<FileInfo>;
    /// Rename within a single directory. Atomic for one call; there is no
    /// transaction across calls.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).map_err(|e| DubError::invalid_path(path, e))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DubError::invalid_path(path, e))?;
            // Follow symlinks so a link to a file is listed as a file
            let is_dir = entry.path().is_dir();
            result.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        Ok(result)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let metadata = fs::metadata(path).map_err(|e| DubError::invalid_path(path, e))?;
        let modified = metadata
            .modified()
            .map_err(|e| DubError::invalid_path(path, e))?;
        Ok(FileInfo {
            is_dir: metadata.is_dir(),
            size_bytes: metadata.len(),
            modified_at: DateTime::<Local>::from(modified),
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| DubError::invalid_path(path, e))
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    contents: Vec<u8>,
    modified_at: DateTime<Local>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, MemoryNode>,
    dirs: HashSet<PathBuf>,
    failing_renames: HashSet<PathBuf>,
    rename_calls: Vec<(PathBuf, PathBuf)>,
}

/// In-memory filesystem with rename-failure injection.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        let path = path.into();
        let mut state = self.lock();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            state.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        state.files.insert(
            path,
            MemoryNode {
                contents: contents.into(),
                modified_at: Local::now(),
            },
        );
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.lock().dirs.insert(path.into());
    }

    /// Make every rename whose source is `from` fail with a permission error.
    pub fn fail_rename_from(&self, from: impl Into<PathBuf>) {
        self.lock().failing_renames.insert(from.into());
    }

    pub fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    /// Paths of all files, in sorted order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    /// Every rename attempted so far, including failed ones.
    pub fn rename_calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.lock().rename_calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(path: &Path) -> DubError {
    DubError::invalid_path(
        path,
        io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
    )
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let state = self.lock();
        if !state.dirs.contains(path) {
            return Err(not_found(path));
        }

        let files = state
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .map(|p| (p, false));
        let dirs = state
            .dirs
            .iter()
            .filter(|p| p.parent() == Some(path))
            .map(|p| (p, true));

        Ok(files
            .chain(dirs)
            .filter_map(|(p, is_dir)| {
                p.file_name().map(|name| DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir,
                })
            })
            .collect())
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let state = self.lock();
        if let Some(node) = state.files.get(path) {
            return Ok(FileInfo {
                is_dir: false,
                size_bytes: node.contents.len() as u64,
                modified_at: node.modified_at,
            });
        }
        if state.dirs.contains(path) {
            return Ok(FileInfo {
                is_dir: true,
                size_bytes: 0,
                modified_at: Local::now(),
            });
        }
        Err(not_found(path))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state
            .rename_calls
            .push((from.to_path_buf(), to.to_path_buf()));

        if state.failing_renames.contains(from) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }

        let node = state
            .files
            .remove(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        state.files.insert(to.to_path_buf(), node);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .map(|node| node.contents.clone())
            .ok_or_else(|| not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_os_read_dir_missing_path_is_invalid_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = OsFileSystem.read_dir(&missing).unwrap_err();
        assert!(matches!(err, DubError::InvalidPath { .. }));
    }

    #[test]
    fn test_os_stat_reports_size() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "hello").unwrap();

        let info = OsFileSystem.stat(&file).unwrap();
        assert!(!info.is_dir);
        assert_eq!(info.size_bytes, 5);
    }

    #[test]
    fn test_memory_read_dir_lists_children_only() {
        let mem = MemoryFileSystem::new();
        mem.add_file("/photos/a.jpg", "a");
        mem.add_file("/photos/trip/b.jpg", "b");

        let mut names: Vec<(String, bool)> = mem
            .read_dir(Path::new("/photos"))
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.is_dir))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![("a.jpg".to_string(), false), ("trip".to_string(), true)]
        );
    }

    #[test]
    fn test_memory_rename_failure_injection() {
        let mem = MemoryFileSystem::new();
        mem.add_file("/d/a.txt", "a");
        mem.fail_rename_from("/d/a.txt");

        let err = mem
            .rename(Path::new("/d/a.txt"), Path::new("/d/b.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(mem.exists(Path::new("/d/a.txt")));
        assert_eq!(mem.rename_calls().len(), 1);
    }
}
