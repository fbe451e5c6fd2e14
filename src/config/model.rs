//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for depot.
///
/// This struct represents the contents of `depot.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Repository settings
    // =========================================================================
    /// Repository root. `REPOSITORY_PATH` takes precedence; the current
    /// directory is used when neither is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_path: Option<String>,

    /// Directory holding shared lock files. Relative paths are resolved
    /// against the repository root.
    #[serde(default = "default_shared_lock_path")]
    pub shared_lock_path: String,

    /// Keep each repository in its own subdirectory of the root
    /// (`archive/`, `deposit/`). Off: both repositories share the root.
    #[serde(default)]
    pub split_repositories: bool,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Maximum seconds to wait for a contended lock before giving up.
    #[serde(default = "default_lock_max_wait_seconds")]
    pub lock_max_wait_seconds: u64,

    /// Milliseconds between lock attempts.
    #[serde(default = "default_lock_retry_interval_ms")]
    pub lock_retry_interval_ms: u64,

    // =========================================================================
    // Content catalog
    // =========================================================================
    /// Content types keyed by API name.
    #[serde(default = "default_content_types")]
    pub content_types: BTreeMap<String, ContentTypeInfo>,

    /// Content format to file extension.
    #[serde(default = "default_format_extensions")]
    pub format_extensions: BTreeMap<String, String>,

    /// Milestones accepted as file name qualifiers.
    #[serde(default = "default_milestones")]
    pub milestones: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_path: None,
            shared_lock_path: default_shared_lock_path(),
            split_repositories: false,
            lock_max_wait_seconds: default_lock_max_wait_seconds(),
            lock_retry_interval_ms: default_lock_retry_interval_ms(),
            content_types: default_content_types(),
            format_extensions: default_format_extensions(),
            milestones: default_milestones(),
        }
    }
}
