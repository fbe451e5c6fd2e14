//! Lock mode, acquisition options and lock listing records.

use super::metadata::LockHolder;
use crate::config::Config;
use crate::error::DepotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default wait budget for a contended lock.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(10);

/// Default pause between lock attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Advisory lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Any number of readers may hold the lock together.
    Shared,
    /// A single writer holds the lock alone.
    Exclusive,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Shared => "shared",
            LockMode::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockMode {
    type Err = DepotError;

    /// Accepts `shared`/`read`/`r` and `exclusive`/`write`/`w`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" | "read" | "r" => Ok(LockMode::Shared),
            "exclusive" | "write" | "w" => Ok(LockMode::Exclusive),
            _ => Err(DepotError::InvalidLockMode(s.to_string())),
        }
    }
}

/// How long and how often to retry a contended lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Total time to keep retrying. Zero means a single attempt.
    pub max_wait: Duration,
    /// Pause between attempts.
    pub retry_interval: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl LockOptions {
    /// Options taken from the `lock_*` config settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_wait: config.lock_max_wait(),
            retry_interval: config.lock_retry_interval(),
        }
    }

    /// Set the total wait budget.
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }
}

/// A lock file found in the shared lock directory.
#[derive(Debug, Clone, Serialize)]
pub struct LockInfo {
    /// The lock file path.
    pub path: PathBuf,

    /// The lock name (file stem, i.e. the base name of the guarded file).
    pub name: String,

    /// Holder record written by the last exclusive holder, if any.
    pub holder: Option<LockHolder>,

    /// Whether some process holds the lock right now.
    pub held: bool,
}

impl fmt::Display for LockInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.held { "held" } else { "free" };
        match &self.holder {
            Some(holder) if self.held => write!(
                f,
                "{} ({}, {} by {}, {} ago)",
                self.name,
                state,
                holder.mode,
                holder.owner,
                holder.age_string()
            ),
            _ => write!(f, "{} ({})", self.name, state),
        }
    }
}
