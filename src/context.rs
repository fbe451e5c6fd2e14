//! Repository context resolution for depot.
//!
//! Finds the repository root (the directory holding one subdirectory per
//! object id) and derives the repository directories and the shared lock
//! directory from it.
//!
//! All commands go through this module so that every process pointed at the
//! same root agrees on where versions live and where lock files go.

use crate::config::Config;
use crate::error::{DepotError, Result};
use crate::naming::FileSpec;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the repository root.
pub const REPOSITORY_PATH_ENV: &str = "REPOSITORY_PATH";

/// Subdirectory of the root holding archived objects when
/// `split_repositories` is on.
pub const ARCHIVE_DIR: &str = "archive";

/// Subdirectory of the root holding deposited objects when
/// `split_repositories` is on.
pub const DEPOSIT_DIR: &str = "deposit";

/// Resolved paths for one repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    /// Repository root.
    pub root: PathBuf,

    /// Directory holding lock files shared by every process using this root.
    pub lock_dir: PathBuf,

    /// Whether each repository has its own subdirectory of the root.
    pub split_repositories: bool,
}

impl RepositoryContext {
    /// Resolve the repository root for this invocation.
    ///
    /// Precedence: `REPOSITORY_PATH`, then the config's `repository_path`,
    /// then the current working directory.
    pub fn resolve(config: &Config) -> Result<Self> {
        if let Some(root) = env::var_os(REPOSITORY_PATH_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(root = ?root, "repository root from environment");
            return Ok(Self::from_root(root, config));
        }

        if let Some(root) = config.repository_path.as_deref().filter(|p| !p.is_empty()) {
            tracing::debug!(root, "repository root from config");
            return Ok(Self::from_root(root, config));
        }

        let cwd = env::current_dir().map_err(|e| {
            DepotError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        Ok(Self::from_root(cwd, config))
    }

    /// Build the context for a known root.
    ///
    /// A relative `shared_lock_path` is taken relative to the root.
    pub fn from_root<P: Into<PathBuf>>(root: P, config: &Config) -> Self {
        let root = root.into();
        let lock_dir = root.join(&config.shared_lock_path);
        Self {
            root,
            lock_dir,
            split_repositories: config.split_repositories,
        }
    }

    /// Directory of a repository.
    ///
    /// Both repositories live directly under the root unless
    /// `split_repositories` is set.
    ///
    /// # Arguments
    ///
    /// * `repository` - `onedep-archive` or `onedep-deposit` (any case)
    ///
    /// # Errors
    ///
    /// `DepotError::UnknownRepository` for any other name.
    pub fn repository_dir(&self, repository: &str) -> Result<PathBuf> {
        let subdir = match repository.to_ascii_lowercase().as_str() {
            "onedep-archive" => ARCHIVE_DIR,
            "onedep-deposit" => DEPOSIT_DIR,
            _ => return Err(DepotError::UnknownRepository(repository.to_string())),
        };

        if self.split_repositories {
            Ok(self.root.join(subdir))
        } else {
            Ok(self.root.clone())
        }
    }

    /// Directory holding every file of `spec`'s object in `repository`.
    pub fn object_dir(&self, repository: &str, spec: &FileSpec) -> Result<PathBuf> {
        Ok(spec.object_dir(&self.repository_dir(repository)?))
    }
}
