//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{DepotError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DEPOT_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "depot.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DepotError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DepotError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Locate and load the config for this invocation.
    ///
    /// Precedence: the explicit path, then `DEPOT_CONFIG`, then `depot.yaml`
    /// in the current directory. With none of those present the defaults are
    /// used. An explicitly named file that cannot be loaded is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(PathBuf::from(path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means "all defaults".
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| DepotError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DepotError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_retry_interval_ms` must be positive
    /// - `shared_lock_path` must be non-empty
    /// - every content type needs a non-empty file token and only formats
    ///   listed in `format_extensions`
    /// - extensions must be non-empty and have no leading dots
    pub fn validate(&self) -> Result<()> {
        if self.lock_retry_interval_ms == 0 {
            return Err(DepotError::UserError(
                "config validation failed: lock_retry_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.shared_lock_path.trim().is_empty() {
            return Err(DepotError::UserError(
                "config validation failed: shared_lock_path must be non-empty".to_string(),
            ));
        }

        for (format, ext) in &self.format_extensions {
            if ext.is_empty() {
                return Err(DepotError::UserError(format!(
                    "config validation failed: format '{}' has an empty extension",
                    format
                )));
            }
            if ext.starts_with('.') {
                return Err(DepotError::UserError(format!(
                    "config validation failed: extension for format '{}' must not have a leading dot (found '{}'). Use '{}' instead.",
                    format,
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        for (name, info) in &self.content_types {
            if info.file_token.is_empty() {
                return Err(DepotError::UserError(format!(
                    "config validation failed: content type '{}' has an empty file_token",
                    name
                )));
            }
            if let Some(format) = info
                .formats
                .iter()
                .find(|f| !self.format_extensions.contains_key(f.as_str()))
            {
                return Err(DepotError::UserError(format!(
                    "config validation failed: content type '{}' lists format '{}' which has no entry in format_extensions",
                    name, format
                )));
            }
        }

        Ok(())
    }

    /// Maximum time to wait for a contended lock.
    pub fn lock_max_wait(&self) -> Duration {
        Duration::from_secs(self.lock_max_wait_seconds)
    }

    /// Pause between lock attempts.
    pub fn lock_retry_interval(&self) -> Duration {
        Duration::from_millis(self.lock_retry_interval_ms)
    }
}
