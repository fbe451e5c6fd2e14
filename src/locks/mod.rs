//! Advisory locking subsystem for depot.
//!
//! Readers and writers in independent processes coordinate through OS
//! advisory locks (`flock` on Unix, `LockFileEx` on Windows):
//! - Shared locks for readers (any number at once)
//! - Exclusive locks for writers (one at a time, no readers)
//!
//! Only cooperating processes observe these locks; a process that never
//! asks for one can still read or write the file.
//!
//! # Acquisition
//!
//! Each attempt is non-blocking. On contention the caller waits one retry
//! interval and tries again until the wait budget runs out
//! (`LockTimeout`). The wait is on a [`CancelToken`], so another thread can
//! abandon a pending acquisition (`LockCancelled`).
//!
//! # Lock Files
//!
//! [`lock_file_path`] maps a repository file to `<lock_dir>/<base>.lock`.
//! Exclusive holders write JSON holder metadata into the lock file:
//! - `owner`: The owner of the lock (e.g., `user@HOST`)
//! - `pid`: The process ID
//! - `acquired_at`: RFC3339 timestamp
//! - `mode`: `exclusive`
//!
//! Lock files are never deleted: removing a file another process has open
//! but not yet locked would let two processes lock different inodes.
//!
//! # RAII Guards
//!
//! Locks are managed through RAII guard objects that release the lock when
//! dropped, including during unwinding. If unlocking fails during drop, a
//! warning is logged and the program continues.

mod cancel;
mod guard;
mod metadata;
mod operations;
mod types;


// Re-export public API
pub use cancel::CancelToken;
pub use guard::{LockGuard, PathLock};
pub use metadata::LockHolder;
pub use operations::{
    LOCK_FILE_EXTENSION, acquire, acquire_path, list_locks, lock_file_path, with_lock, with_path_lock,
};
pub use types::{DEFAULT_MAX_WAIT, DEFAULT_RETRY_INTERVAL, LockInfo, LockMode, LockOptions};
