//! Versioned path resolution.
//!
//! Every stored file carries a `.V<n>` suffix. This module lists the
//! versions present for a [`FileSpec`](crate::naming::FileSpec) and turns a
//! symbolic [`VersionToken`] (`next`, `latest`, `previous`, `first`,
//! `second`) into a concrete path.
//!
//! # Snapshot semantics
//!
//! The directory is re-read on every call and nothing is cached. Listing and
//! use are not atomic: another process may add a version between resolution
//! and open. Callers that need a stable answer hold the lock for the file
//! (see [`crate::locks`]) across both steps.

mod resolve;
mod scan;
mod token;


// Re-export public API
pub use resolve::{latest_version, next_version, resolve_version, resolve_version_number, select_version};
pub use scan::{MalformedEntry, VersionEntry, VersionScan, parse_version_suffix, scan_versions};
pub use token::VersionToken;
