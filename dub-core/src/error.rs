//! Error kinds reported by the rename core.
//!
//! Every variant is a local, recoverable condition returned to the immediate
//! caller. Filesystem failures while executing a plan are not errors here:
//! they are reported inside [`crate::RenameOutcome`] together with rollback
//! results.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = DubError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DubError {
    /// A directory or file does not exist or cannot be read.
    #[error("invalid path {}: {source}", path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A regular expression failed to compile after shortcut expansion.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Preview was called with a different number of names than files.
    #[error("number of new names ({names}) does not match number of files ({files})")]
    MismatchedNames { files: usize, names: usize },

    /// A proposed name would escape its directory or is otherwise unusable.
    #[error("invalid file name '{name}': names must stay in their directory and may not contain '..', '/' or '\\'")]
    InvalidFileName { name: String },

    /// Another process holds the state directory lock.
    #[error("another dub process is already running (PID: {pid}); remove {} if this is incorrect", path.display())]
    Locked { pid: u32, path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DubError {
    pub(crate) fn invalid_path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InvalidPath {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
