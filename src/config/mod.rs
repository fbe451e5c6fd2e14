//! Configuration model for depot.
//!
//! This module defines the Config struct that represents `depot.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.
//!
//! The content catalog (content types, format extensions, milestones) lives
//! in the config so a deployment can extend it without a rebuild.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use operations::{CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use types::ContentTypeInfo;
