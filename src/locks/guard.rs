//! RAII lock guard implementations.

use super::metadata::LockHolder;
use super::types::LockMode;
use crate::error::{DepotError, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// RAII guard for an advisory lock on a borrowed file.
///
/// When dropped, the lock is released. If unlocking fails, a warning is
/// logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'a> {
    /// The locked file.
    file: &'a File,

    /// Mode the lock was taken in.
    mode: LockMode,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> LockGuard<'a> {
    /// Wrap a file whose lock is already held.
    pub(super) fn new(file: &'a File, mode: LockMode) -> Self {
        Self {
            file,
            mode,
            released: false,
        }
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn file(&self) -> &'a File {
        self.file
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release the lock before the guard
    /// goes out of scope, and want to handle errors explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        FileExt::unlock(self.file)
            .map_err(|e| DepotError::LockIo(format!("failed to release {} lock: {}", self.mode, e)))
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = FileExt::unlock(self.file)
        {
            tracing::warn!(mode = %self.mode, error = %e, "failed to release lock");
        }
    }
}

/// RAII guard owning a lock file and the advisory lock on it.
///
/// Exclusive holders record themselves in the file; the record is cleared
/// again on release.
#[derive(Debug)]
pub struct PathLock {
    /// The open lock file.
    file: File,

    /// Path to the lock file.
    path: PathBuf,

    /// Mode the lock was taken in.
    mode: LockMode,

    /// Whether the lock has been released manually.
    released: bool,
}

impl PathLock {
    /// Wrap an open lock file whose lock is already held.
    pub(super) fn new(file: File, path: PathBuf, mode: LockMode) -> Self {
        Self {
            file,
            path,
            mode,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Overwrite the lock file with a holder record.
    pub(super) fn write_holder(&self, holder: &LockHolder) -> Result<()> {
        let json = holder.to_json()?;
        let write_err = |e: std::io::Error| {
            DepotError::LockIo(format!(
                "failed to write lock holder to '{}': {}",
                self.path.display(),
                e
            ))
        };

        self.file.set_len(0).map_err(write_err)?;
        let mut file = &self.file;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)
    }

    /// Manually release the lock.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.clear_holder();
        FileExt::unlock(&self.file).map_err(|e| {
            DepotError::LockIo(format!(
                "failed to release lock '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn clear_holder(&self) {
        if self.mode == LockMode::Exclusive
            && let Err(e) = self.file.set_len(0)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to clear lock holder");
        }
    }
}

impl Drop for PathLock {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.clear_holder();
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}
