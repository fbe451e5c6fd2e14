//! Lock holder records.

use super::types::LockMode;
use crate::error::{DepotError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Who holds a lock, written into the lock file by exclusive holders.
///
/// The record is informational only: exclusion comes from the OS lock,
/// never from the presence or content of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHolder {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    pub pid: u32,

    /// When the lock was acquired.
    pub acquired_at: DateTime<Utc>,

    /// Mode the lock was taken in.
    pub mode: LockMode,
}

impl LockHolder {
    /// Holder record for the current process, stamped now.
    pub fn new(mode: LockMode) -> Self {
        Self {
            owner: get_owner_string(),
            pid: std::process::id(),
            acquired_at: Utc::now(),
            mode,
        }
    }

    /// Parse a holder record from a lock file.
    ///
    /// Returns `Ok(None)` for an empty lock file (never held exclusively, or
    /// released cleanly).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DepotError::UserError(format!(
                "failed to read lock file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content).map(Some).map_err(|e| {
            DepotError::UserError(format!(
                "failed to parse lock file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Serialize the holder record to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DepotError::UserError(format!("failed to serialize lock holder: {}", e)))
    }

    /// How long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();

        if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds % 60)
        } else {
            format!("{}s", seconds.max(0))
        }
    }
}

/// Get the owner string for holder records.
pub(crate) fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().split('.').next().unwrap_or_default().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
