//! Directory listing and strict version suffix parsing.

use crate::error::{DepotError, Result};
use crate::naming::FileSpec;
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// A version number as written by the repository: no sign, no leading zeros.
static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("version number regex is valid"));

/// One version of a file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    /// Full path of the versioned file.
    pub path: PathBuf,
    /// Version number parsed from the `.V<n>` suffix.
    pub version: u32,
}

/// A file that matched the version prefix but carries an unusable suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    pub name: String,
    pub reason: String,
}

impl MalformedEntry {
    fn new(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<MalformedEntry> for DepotError {
    fn from(entry: MalformedEntry) -> Self {
        DepotError::MalformedVersionEntry {
            name: entry.name,
            reason: entry.reason,
        }
    }
}

/// Result of listing the versions of one file.
#[derive(Debug, Clone, Default)]
pub struct VersionScan {
    /// Parsed versions, highest first.
    pub entries: Vec<VersionEntry>,
    /// Matching names that were skipped.
    pub malformed: Vec<MalformedEntry>,
}

impl VersionScan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest version on disk.
    pub fn highest(&self) -> Option<&VersionEntry> {
        self.entries.first()
    }

    /// Lowest version on disk.
    pub fn lowest(&self) -> Option<&VersionEntry> {
        self.entries.last()
    }
}

/// Parse the version number that follows `prefix` in `name`.
///
/// The suffix must be a positive decimal integer without leading zeros;
/// anything else (`.V`, `.V0`, `.V2.bak`, `.Vx`) is malformed.
pub fn parse_version_suffix(name: &str, prefix: &str) -> std::result::Result<u32, MalformedEntry> {
    let suffix = name
        .strip_prefix(prefix)
        .ok_or_else(|| MalformedEntry::new(name, "does not start with the version prefix"))?;

    if suffix.is_empty() {
        return Err(MalformedEntry::new(name, "missing version number"));
    }
    if !VERSION_NUMBER.is_match(suffix) {
        return Err(MalformedEntry::new(
            name,
            "version suffix is not a positive integer",
        ));
    }

    suffix
        .parse::<u32>()
        .map_err(|_| MalformedEntry::new(name, "version number out of range"))
}

/// List every version of `spec` under `repo_dir/<id>/`.
///
/// Entries are returned highest version first. Matching names with a bad
/// suffix are logged and reported in [`VersionScan::malformed`] instead of
/// failing the scan.
///
/// # Errors
///
/// * `DepotError::RepositoryAccessError` - the object directory cannot be read
pub fn scan_versions(repo_dir: &Path, spec: &FileSpec) -> Result<VersionScan> {
    let dir = spec.object_dir(repo_dir);
    let prefix = spec.version_prefix();
    let matcher = version_matcher(&prefix)?;

    let read_dir = fs::read_dir(&dir).map_err(|e| access_error(&dir, &e))?;

    let mut scan = VersionScan::default();
    for entry in read_dir {
        let entry = entry.map_err(|e| access_error(&dir, &e))?;
        let file_name = entry.file_name();

        let Some(name) = file_name.to_str() else {
            let lossy = file_name.to_string_lossy();
            if lossy.starts_with(&prefix) {
                tracing::warn!(dir = %dir.display(), name = %lossy, "skipping non UTF-8 version entry");
                scan.malformed
                    .push(MalformedEntry::new(&lossy, "file name is not valid UTF-8"));
            }
            continue;
        };

        if !matcher.is_match(name) {
            continue;
        }

        match parse_version_suffix(name, &prefix) {
            Ok(version) => scan.entries.push(VersionEntry {
                path: entry.path(),
                version,
            }),
            Err(malformed) => {
                tracing::warn!(
                    dir = %dir.display(),
                    name = %malformed.name,
                    reason = %malformed.reason,
                    "skipping malformed version entry"
                );
                scan.malformed.push(malformed);
            }
        }
    }

    scan.entries.sort_by(|a, b| b.version.cmp(&a.version));

    tracing::debug!(
        dir = %dir.display(),
        file = %spec,
        versions = scan.entries.len(),
        malformed = scan.malformed.len(),
        "scanned versions"
    );
    Ok(scan)
}

/// Glob matching `<prefix>*` with the prefix taken literally.
fn version_matcher(prefix: &str) -> Result<GlobMatcher> {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '\\' | '!') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');

    GlobBuilder::new(&pattern)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| {
            DepotError::UserError(format!("invalid file name pattern '{}': {}", pattern, e))
        })
}

fn access_error(dir: &Path, err: &std::io::Error) -> DepotError {
    DepotError::RepositoryAccessError {
        path: dir.to_path_buf(),
        reason: err.to_string(),
    }
}
