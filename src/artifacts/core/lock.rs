//! Scoped advisory locking for read-modify-write on shared files
//!
//! The lock lives in a sidecar `<file>.lock` so the protected file itself can be replaced by
//! rename while the lock is held. The sidecar is left in place after release; only the OS lock
//! on it matters.

use crate::errors::Result;
use file_guard::Lock;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCK_SUFFIX: &str = ".lock";

/// `<path>.lock`
pub fn lock_path_for(path: &Path) -> PathBuf {
    let mut lock_path = OsString::from(path.as_os_str());
    lock_path.push(LOCK_SUFFIX);
    PathBuf::from(lock_path)
}

/// Run `f` while holding an exclusive lock guarding `path`.
///
/// Blocks until the lock is available. The lock is released when `f` returns, whether it
/// succeeded or failed.
pub fn with_lock<T>(path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let lock_path = lock_path_for(path);
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let lock_file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)?;
    let _guard = file_guard::lock(&lock_file, Lock::Exclusive, 0, 1)?;
    debug!(path = %lock_path.display(), "lock acquired");

    f()
}
