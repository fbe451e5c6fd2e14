//! Repository file naming.
//!
//! Versioned files live at `<repo>/<id>/<id>_<type>[-<milestone>]_P<part>.<ext>.V<n>`.
//! [`FileSpec`] holds the on-disk tokens; the catalog translates API names
//! (e.g. `structure-factors`, `pdbx`) into those tokens.

use std::fmt;
use std::path::{Path, PathBuf};

/// Delimiter between the base file name and the version number.
pub const VERSION_DELIMITER: &str = ".V";

/// The identifying parts of a versioned repository file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Object (deposition) identifier, e.g. `D_1000000001`.
    pub id: String,
    /// Content type token as it appears in file names.
    pub content_type: String,
    /// Optional milestone qualifier appended to the content type.
    pub milestone: Option<String>,
    /// Part number (1-based).
    pub part_number: u32,
    /// Format token (file extension) as it appears in file names.
    pub format: String,
}

impl FileSpec {
    pub fn new(
        id: impl Into<String>,
        content_type: impl Into<String>,
        part_number: u32,
        format: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            milestone: None,
            part_number,
            format: format.into(),
        }
    }

    /// Qualify the content type with a milestone.
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    /// File name without the version suffix.
    pub fn base_file_name(&self) -> String {
        match &self.milestone {
            Some(milestone) => format!(
                "{}_{}-{}_P{}.{}",
                self.id, self.content_type, milestone, self.part_number, self.format
            ),
            None => format!(
                "{}_{}_P{}.{}",
                self.id, self.content_type, self.part_number, self.format
            ),
        }
    }

    /// Prefix shared by every version of this file (`<base>.V`).
    pub fn version_prefix(&self) -> String {
        format!("{}{}", self.base_file_name(), VERSION_DELIMITER)
    }

    /// File name of a specific version.
    pub fn file_name(&self, version: u32) -> String {
        format!("{}{}", self.version_prefix(), version)
    }

    /// Directory holding every file of this object under a repository directory.
    pub fn object_dir(&self, repo_dir: &Path) -> PathBuf {
        repo_dir.join(&self.id)
    }

    /// Full path of a specific version under a repository directory.
    pub fn versioned_path(&self, repo_dir: &Path, version: u32) -> PathBuf {
        self.object_dir(repo_dir).join(self.file_name(version))
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_file_name())
    }
}
