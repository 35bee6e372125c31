//! File-based locking for single-writer safety.
//!
//! fs2 advisory lock on `<root>/LOCK`:
//! - the roster has exactly one writer per root (one FileKv at a time);
//! - try_* fails fast with `StoreError::Locked`, acquire_* blocks.
//!
//! Lock is released on Drop.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::consts::LOCK_FILE;
use crate::error::{Result, StoreError};

pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn lock_file_path(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

fn open_lock_file(root: &Path) -> Result<File> {
    let path = lock_file_path(root);
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .map_err(|e| StoreError::io("open lock file", &path, e))
}

/// Acquire the exclusive lock, blocking until the current holder releases it.
pub fn acquire_exclusive_lock(root: &Path) -> Result<LockGuard> {
    let file = open_lock_file(root)?;
    let path = lock_file_path(root);
    file.lock_exclusive()
        .map_err(|e| StoreError::io("lock_exclusive", &path, e))?;
    Ok(LockGuard { file, path })
}

/// Try to acquire the exclusive lock. `StoreError::Locked` if another writer holds it.
pub fn try_acquire_exclusive_lock(root: &Path) -> Result<LockGuard> {
    let file = open_lock_file(root)?;
    let path = lock_file_path(root);
    match file.try_lock_exclusive() {
        Ok(()) => Ok(LockGuard { file, path }),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            Err(StoreError::Locked { path: root.to_path_buf() })
        }
        Err(e) => Err(StoreError::io("try_lock_exclusive", &path, e)),
    }
}
