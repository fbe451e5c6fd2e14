//! Lock acquisition, scoped execution, and listing operations.

use super::cancel::CancelToken;
use super::guard::{LockGuard, PathLock};
use super::metadata::LockHolder;
use super::types::{LockInfo, LockMode, LockOptions};
use crate::error::{DepotError, Result, ScopeError};
use crate::naming::FileSpec;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of lock files in the shared lock directory.
pub const LOCK_FILE_EXTENSION: &str = "lock";

/// One non-blocking lock request.
fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
    match mode {
        LockMode::Shared => FileExt::try_lock_shared(file),
        LockMode::Exclusive => FileExt::try_lock_exclusive(file),
    }
}

/// Whether a failed lock request means "held by someone else".
fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Take the lock, retrying on contention until `options.max_wait` runs out.
///
/// Attempts are spaced by `options.retry_interval`; the pause is a wait on
/// `cancel`, so cancelling wakes the caller immediately.
fn lock_with_retry(
    file: &File,
    mode: LockMode,
    options: &LockOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        match try_lock(file, mode) {
            Ok(()) => {
                tracing::debug!(mode = %mode, attempts, "lock acquired");
                return Ok(());
            }
            Err(e) if is_contended(&e) => {}
            Err(e) => return Err(DepotError::LockIo(e.to_string())),
        }

        let waited = started.elapsed();
        if waited >= options.max_wait {
            tracing::warn!(mode = %mode, attempts, ?waited, "lock timed out");
            return Err(DepotError::LockTimeout { attempts, waited });
        }

        let pause = options.retry_interval.min(options.max_wait - waited);
        tracing::debug!(mode = %mode, attempt = attempts, ?pause, "lock busy, retrying");
        if cancel.wait_timeout(pause) {
            tracing::debug!(mode = %mode, attempts, "lock wait cancelled");
            return Err(DepotError::LockCancelled { attempts });
        }
    }
}

/// Acquire an advisory lock on an open file.
///
/// The lock is process-wide and visible to every cooperating process that
/// locks the same file. It is released when the returned guard is dropped.
///
/// # Errors
///
/// * `DepotError::LockTimeout` - still contended after `options.max_wait`
/// * `DepotError::LockCancelled` - `cancel` fired while waiting
/// * `DepotError::LockIo` - the OS rejected the request for another reason
pub fn acquire<'a>(
    file: &'a File,
    mode: LockMode,
    options: &LockOptions,
    cancel: &CancelToken,
) -> Result<LockGuard<'a>> {
    lock_with_retry(file, mode, options, cancel)?;
    Ok(LockGuard::new(file, mode))
}

/// Run `f` while holding a lock on `file`.
///
/// The lock is released before this returns, whether `f` succeeds, fails or
/// panics. A failure from `f` comes back as `DepotError::LockScopeError`
/// carrying the original error as its source.
pub fn with_lock<T, E, F>(
    file: &File,
    mode: LockMode,
    options: &LockOptions,
    cancel: &CancelToken,
    f: F,
) -> Result<T>
where
    F: FnOnce(&File) -> std::result::Result<T, E>,
    E: Into<ScopeError>,
{
    let guard = acquire(file, mode, options, cancel)?;
    let outcome = f(file);
    drop(guard);
    outcome.map_err(scope_error)
}

/// Open (creating if needed) the lock file at `path` and lock it.
///
/// Missing parent directories are created. Exclusive holders write a
/// [`LockHolder`] record into the file.
pub fn acquire_path(
    path: &Path,
    mode: LockMode,
    options: &LockOptions,
    cancel: &CancelToken,
) -> Result<PathLock> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            DepotError::LockIo(format!(
                "failed to create lock directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| {
            DepotError::LockIo(format!(
                "failed to open lock file '{}': {}",
                path.display(),
                e
            ))
        })?;

    lock_with_retry(&file, mode, options, cancel)?;
    let lock = PathLock::new(file, path.to_path_buf(), mode);

    if mode == LockMode::Exclusive {
        lock.write_holder(&LockHolder::new(mode))?;
    }

    tracing::debug!(path = %path.display(), mode = %mode, "path lock acquired");
    Ok(lock)
}

/// Run `f` while holding the lock file at `path`.
///
/// Same release and error wrapping rules as [`with_lock`].
pub fn with_path_lock<T, E, F>(
    path: &Path,
    mode: LockMode,
    options: &LockOptions,
    cancel: &CancelToken,
    f: F,
) -> Result<T>
where
    F: FnOnce(&PathLock) -> std::result::Result<T, E>,
    E: Into<ScopeError>,
{
    let lock = acquire_path(path, mode, options, cancel)?;
    let outcome = f(&lock);
    drop(lock);
    outcome.map_err(scope_error)
}

fn scope_error<E: Into<ScopeError>>(err: E) -> DepotError {
    let source = err.into();
    tracing::warn!(error = %source, "error inside locked scope");
    DepotError::LockScopeError { source }
}

/// Lock file guarding every version of `spec`: `<lock_dir>/<base>.lock`.
///
/// All processes derive the same path for the same logical file, so they
/// serialize on it regardless of which version they resolve.
pub fn lock_file_path(lock_dir: &Path, spec: &FileSpec) -> PathBuf {
    lock_dir.join(format!("{}.{}", spec.base_file_name(), LOCK_FILE_EXTENSION))
}

/// Whether some process currently holds the lock file at `path`.
///
/// Checks with a non-blocking exclusive request that is released at once.
fn currently_held(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(|e| {
        DepotError::LockIo(format!(
            "failed to open lock file '{}': {}",
            path.display(),
            e
        ))
    })?;

    match FileExt::try_lock_exclusive(&file) {
        Ok(()) => {
            if let Err(e) = FileExt::unlock(&file) {
                tracing::warn!(path = %path.display(), error = %e, "failed to release lock check");
            }
            Ok(false)
        }
        Err(e) if is_contended(&e) => Ok(true),
        Err(e) => Err(DepotError::LockIo(e.to_string())),
    }
}

/// List all lock files in `lock_dir`.
///
/// # Returns
///
/// A vector of `LockInfo` sorted by name; empty if the directory does not exist.
pub fn list_locks(lock_dir: &Path) -> Result<Vec<LockInfo>> {
    let mut locks = Vec::new();

    if !lock_dir.exists() {
        return Ok(locks);
    }

    let entries = fs::read_dir(lock_dir).map_err(|e| {
        DepotError::UserError(format!(
            "failed to read lock directory '{}': {}",
            lock_dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            DepotError::UserError(format!("failed to read lock directory entry: {}", e))
        })?;

        let path = entry.path();

        // Skip non-lock files
        if path.extension().and_then(|e| e.to_str()) != Some(LOCK_FILE_EXTENSION) {
            continue;
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        // Unreadable or half-written records are not fatal for a listing.
        let holder = match LockHolder::from_file(&path) {
            Ok(holder) => holder,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring lock holder record");
                None
            }
        };

        let held = currently_held(&path)?;

        locks.push(LockInfo {
            path,
            name,
            holder,
            held,
        });
    }

    // Sort by name for consistent output
    locks.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(locks)
}
