//! Depot: versioned file paths and advisory locks for a deposition repository.
//!
//! Every stored file lives at `<repo>/<id>/<id>_<type>_P<part>.<ext>.V<n>`.
//! The crate resolves symbolic versions against what is on disk
//! ([`versions`]), serializes access between cooperating processes with
//! OS advisory locks ([`locks`]), and maps content formats to MIME types
//! ([`mime`]). The `depot` binary wraps these in a small CLI.

mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod logging;
pub mod mime;
pub mod naming;
pub mod versions;

#[cfg(test)]
mod test_support;

pub use error::{DepotError, Result};
