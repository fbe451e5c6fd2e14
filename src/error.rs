//! Error types for depot.
//!
//! Filesystem and parse failures are translated into this taxonomy at the
//! module boundary; raw `std::io::Error` values never reach callers.

use crate::exit_codes;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Boxed error carried out of a locked scope.
pub type ScopeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for depot operations.
#[derive(Error, Debug)]
pub enum DepotError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Lock mode was neither shared nor exclusive.
    #[error("invalid lock mode '{0}' (expected 'shared' or 'exclusive')")]
    InvalidLockMode(String),

    /// The lock stayed contended for the whole wait budget.
    #[error("lock not acquired after {attempts} attempt(s) over {waited:.1?}")]
    LockTimeout { attempts: u32, waited: Duration },

    /// The caller cancelled a pending acquisition.
    #[error("lock acquisition cancelled after {attempts} attempt(s)")]
    LockCancelled { attempts: u32 },

    /// The OS rejected the lock request for a reason other than contention.
    #[error("lock request failed: {0}")]
    LockIo(String),

    /// The code run under a lock failed; the lock was released before this was raised.
    #[error("locked scope failed: {source}")]
    LockScopeError {
        #[source]
        source: ScopeError,
    },

    /// A file matched the version pattern but its `.V<N>` suffix is not a positive integer.
    #[error("malformed version entry '{name}': {reason}")]
    MalformedVersionEntry { name: String, reason: String },

    /// The version token names an ordinal that has no file.
    #[error("no '{token}' version exists ({available} version(s) on disk)")]
    NoSuchVersion { token: String, available: usize },

    /// The version token is outside the recognized set.
    #[error(
        "unknown version token '{0}' (expected next, latest, last, previous, prev, first, second or a number)"
    )]
    UnknownVersionToken(String),

    /// The repository directory could not be enumerated.
    #[error("cannot read repository directory '{}': {reason}", path.display())]
    RepositoryAccessError { path: PathBuf, reason: String },

    /// Repository category is not one of the recognized names.
    #[error("unknown repository '{0}' (expected onedep-archive or onedep-deposit)")]
    UnknownRepository(String),

    /// Content type is not in the catalog.
    #[error("unknown content type '{0}'")]
    UnknownContentType(String),

    /// Content format is not in the catalog.
    #[error("unknown content format '{0}'")]
    UnknownFormat(String),

    /// Content type and format are both known but not a valid combination.
    #[error("content type '{content_type}' does not support format '{format}'")]
    UnsupportedFormat {
        content_type: String,
        format: String,
    },

    /// Milestone is not one of the configured milestones.
    #[error("unknown milestone '{0}'")]
    UnknownMilestone(String),
}

impl DepotError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DepotError::UserError(_)
            | DepotError::InvalidLockMode(_)
            | DepotError::MalformedVersionEntry { .. }
            | DepotError::UnknownVersionToken(_)
            | DepotError::UnknownRepository(_)
            | DepotError::UnknownContentType(_)
            | DepotError::UnknownFormat(_)
            | DepotError::UnsupportedFormat { .. }
            | DepotError::UnknownMilestone(_) => exit_codes::USER_ERROR,
            DepotError::NoSuchVersion { .. } => exit_codes::NO_SUCH_VERSION,
            DepotError::RepositoryAccessError { .. } => exit_codes::REPOSITORY_FAILURE,
            DepotError::LockTimeout { .. }
            | DepotError::LockCancelled { .. }
            | DepotError::LockIo(_) => exit_codes::LOCK_FAILURE,
            DepotError::LockScopeError { .. } => exit_codes::SCOPE_FAILURE,
        }
    }
}

/// Result type alias for depot operations.
pub type Result<T> = std::result::Result<T, DepotError>;
