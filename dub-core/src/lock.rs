use crate::error::{DubError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const LOCK_FILE_NAME: &str = "dub.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Advisory lock on a state directory, so two dub processes never execute
/// a batch against the same working directory at once.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    content: String,
}

impl LockFile {
    /// Acquire the lock in `state_dir`, clearing stale or orphaned locks.
    pub fn acquire(state_dir: &Path) -> Result<Self> {
        let lock_path = state_dir.join(LOCK_FILE_NAME);

        if let Ok(existing) = fs::read_to_string(&lock_path) {
            // Format: "pid:timestamp"
            if let Some((pid, timestamp)) = parse_lock(&existing) {
                let age = now_secs().saturating_sub(timestamp);
                if age <= STALE_LOCK_TIMEOUT_SECS && is_process_running(pid) {
                    return Err(DubError::Locked {
                        pid,
                        path: lock_path,
                    });
                }
            }
            fs::remove_file(&lock_path)?;
        }

        fs::create_dir_all(state_dir)?;
        let content = format!("{}:{}", process::id(), now_secs());

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)?;
        file.write_all(content.as_bytes())?;

        Ok(Self {
            path: lock_path,
            content,
        })
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        // Only remove the lock if it is still ours
        if fs::read_to_string(&self.path).is_ok_and(|c| c.trim() == self.content) {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn parse_lock(content: &str) -> Option<(u32, u64)> {
    let (pid, timestamp) = content.trim().split_once(':')?;
    Some((pid.parse().ok()?, timestamp.parse().ok()?))
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Check if a process with the given PID is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_and_release() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join(".dub");

        let lock = LockFile::acquire(&state_dir).unwrap();
        assert!(state_dir.join(LOCK_FILE_NAME).exists());

        drop(lock);
        assert!(!state_dir.join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let temp_dir = TempDir::new().unwrap();
        let _lock = LockFile::acquire(temp_dir.path()).unwrap();

        let err = LockFile::acquire(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DubError::Locked { .. }));
    }

    #[test]
    fn test_stale_lock_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join(LOCK_FILE_NAME);
        fs::write(&lock_path, format!("{}:0", process::id())).unwrap();

        let lock = LockFile::acquire(temp_dir.path()).unwrap();
        let content = fs::read_to_string(&lock_path).unwrap();
        assert_ne!(content, format!("{}:0", process::id()));
        drop(lock);
    }

    #[test]
    fn test_garbage_lock_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(LOCK_FILE_NAME), "not a lock").unwrap();
        assert!(LockFile::acquire(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_parse_lock() {
        assert_eq!(parse_lock("123:456\n"), Some((123, 456)));
        assert_eq!(parse_lock("nonsense"), None);
    }
}
