//! Version token resolution.

use super::scan::{VersionEntry, VersionScan, scan_versions};
use super::token::VersionToken;
use crate::error::{DepotError, Result};
use crate::naming::FileSpec;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Pick the entry an ordinal token refers to. `entries` is highest first.
fn select_entry(token: VersionToken, entries: &[VersionEntry]) -> Option<&VersionEntry> {
    match token {
        VersionToken::Latest => entries.first(),
        VersionToken::Previous => entries.get(1),
        VersionToken::First => entries.last(),
        VersionToken::Second => entries.len().checked_sub(2).and_then(|i| entries.get(i)),
        VersionToken::Next | VersionToken::Exact(_) => None,
    }
}

fn no_such_version(token: VersionToken, scan: &VersionScan) -> DepotError {
    DepotError::NoSuchVersion {
        token: token.to_string(),
        available: scan.len(),
    }
}

/// Resolve a token to a version number against an already listed directory.
pub fn select_version(token: VersionToken, scan: &VersionScan) -> Result<u32> {
    match token {
        VersionToken::Exact(n) => Ok(n),
        VersionToken::Next => match scan.highest() {
            Some(entry) => entry.version.checked_add(1).ok_or_else(|| {
                DepotError::UserError(format!(
                    "version {} is the highest representable version",
                    entry.version
                ))
            }),
            None => Ok(1),
        },
        _ => select_entry(token, &scan.entries)
            .map(|entry| entry.version)
            .ok_or_else(|| no_such_version(token, scan)),
    }
}

/// List the directory if the token needs it.
///
/// `next` on an object directory that does not exist yet is version 1: the
/// first upload of an object creates the directory.
fn listing_for(token: VersionToken, repo_dir: &Path, spec: &FileSpec) -> Result<VersionScan> {
    if !token.needs_listing() {
        return Ok(VersionScan::default());
    }

    if token == VersionToken::Next
        && let Err(e) = std::fs::symlink_metadata(spec.object_dir(repo_dir))
        && e.kind() == ErrorKind::NotFound
    {
        tracing::debug!(file = %spec, "object directory absent, next version is 1");
        return Ok(VersionScan::default());
    }

    scan_versions(repo_dir, spec)
}

/// Resolve `token` to a version number for `spec` under `repo_dir`.
pub fn resolve_version_number(token: VersionToken, repo_dir: &Path, spec: &FileSpec) -> Result<u32> {
    let scan = listing_for(token, repo_dir, spec)?;
    select_version(token, &scan)
}

/// Resolve `token` to a file path for `spec` under `repo_dir`.
///
/// `next` and explicit numbers yield a path that need not exist; the
/// ordinal tokens yield the path of an existing file.
///
/// # Errors
///
/// * `DepotError::NoSuchVersion` - the ordinal has no file (e.g. `previous` with one version)
/// * `DepotError::RepositoryAccessError` - the object directory cannot be read
pub fn resolve_version(token: VersionToken, repo_dir: &Path, spec: &FileSpec) -> Result<PathBuf> {
    let scan = listing_for(token, repo_dir, spec)?;

    let path = match select_entry(token, &scan.entries) {
        Some(entry) => entry.path.clone(),
        None => {
            let version = select_version(token, &scan)?;
            spec.versioned_path(repo_dir, version)
        }
    };

    tracing::debug!(token = %token, file = %spec, path = %path.display(), "resolved version");
    Ok(path)
}

/// Highest existing version of `spec`.
pub fn latest_version(repo_dir: &Path, spec: &FileSpec) -> Result<u32> {
    resolve_version_number(VersionToken::Latest, repo_dir, spec)
}

/// Version number the next upload of `spec` should use.
pub fn next_version(repo_dir: &Path, spec: &FileSpec) -> Result<u32> {
    resolve_version_number(VersionToken::Next, repo_dir, spec)
}
