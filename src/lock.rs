//! File-based locking to prevent concurrent builds.
//!
//! Uses flock-style advisory locking so two builds over the same base
//! directory cannot interleave writes to the output tree.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// A guard holding an exclusive lock on a build lock file.
/// The lock is released when the guard is dropped.
pub struct LockGuard {
    _file: File,
}

impl LockGuard {
    /// Attempt to acquire an exclusive lock at `path`.
    /// Returns an error if another build holds the lock.
    ///
    /// Uses OpenOptions with create+read+write to avoid a TOCTOU race
    /// between file creation and lock acquisition.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow::anyhow!(
                "Another build is already running in this directory.\n\
                 Wait for it to complete, or remove the lock file: {}",
                path.display()
            )
        })?;

        Ok(Self { _file: file })
    }
}

// Lock is automatically released when the file is closed (on drop)
