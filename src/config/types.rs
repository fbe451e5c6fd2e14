//! Config sub-types and serde default functions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog entry for one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeInfo {
    /// Token used in file names (e.g. `sf` for `structure-factors`).
    pub file_token: String,

    /// Content formats this type may be stored as.
    pub formats: Vec<String>,
}

impl ContentTypeInfo {
    fn new(file_token: &str, formats: &[&str]) -> Self {
        Self {
            file_token: file_token.to_string(),
            formats: formats.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub(super) fn default_shared_lock_path() -> String {
    "locks".to_string()
}

pub(super) fn default_lock_max_wait_seconds() -> u64 {
    10
}

pub(super) fn default_lock_retry_interval_ms() -> u64 {
    1000
}

/// Default content type catalog.
pub fn default_content_types() -> BTreeMap<String, ContentTypeInfo> {
    let entries: [(&str, &str, &[&str]); 18] = [
        ("model", "model", &["pdbx", "pdb", "pdbml", "cifeps"]),
        ("model-emd", "model-emd", &["pdbx", "xml"]),
        ("model-aux", "model-aux", &["pdbx"]),
        ("model-legacy-rcsb", "model-legacy-rcsb", &["pdbx", "pdb"]),
        ("structure-factors", "sf", &["pdbx", "mtz", "txt"]),
        ("structure-factors-legacy-rcsb", "sf-legacy-rcsb", &["pdbx", "mtz"]),
        ("nmr-data-config", "nmr-data-config", &["json"]),
        ("nmr-data-nef", "nmr-data-nef", &["nmr-star", "pdbx"]),
        ("nmr-data-str", "nmr-data-str", &["nmr-star", "pdbx"]),
        ("nmr-data-nef-report", "nmr-data-nef-report", &["json"]),
        ("nmr-data-str-report", "nmr-data-str-report", &["json"]),
        (
            "nmr-restraints",
            "mr",
            &[
                "any", "nmr-star", "amber", "amber-aux", "cns", "cyana", "xplor", "xplor-nih",
                "pdb-mr", "mr",
            ],
        ),
        ("nmr-chemical-shifts", "cs", &["nmr-star", "pdbx", "any"]),
        ("nmr-chemical-shifts-raw", "cs-raw", &["nmr-star", "pdbx"]),
        ("nmr-chemical-shifts-auth", "cs-auth", &["nmr-star", "pdbx"]),
        ("validation-report-depositor", "valdep", &["pdf"]),
        ("em-volume", "em-volume", &["map", "ccp4", "mrc2000", "bcif"]),
        ("seq-align-data", "seq-align-data", &["pic"]),
    ];

    entries
        .into_iter()
        .map(|(name, token, formats)| (name.to_string(), ContentTypeInfo::new(token, formats)))
        .collect()
}

/// Default content format to file extension table.
pub fn default_format_extensions() -> BTreeMap<String, String> {
    [
        ("pdbx", "cif"),
        ("pdb", "pdb"),
        ("cifeps", "cifeps"),
        ("pdbml", "xml"),
        ("nmr-star", "str"),
        ("gz", "gz"),
        ("tgz", "tgz"),
        ("mtz", "mtz"),
        ("html", "html"),
        ("jpg", "jpg"),
        ("png", "png"),
        ("svg", "svg"),
        ("gif", "gif"),
        ("tif", "tif"),
        ("tiff", "tiff"),
        ("sdf", "sdf"),
        ("ccp4", "ccp4"),
        ("mrc2000", "mrc"),
        ("pic", "pic"),
        ("txt", "txt"),
        ("xml", "xml"),
        ("pdf", "pdf"),
        ("map", "map"),
        ("bcif", "bcif"),
        ("amber", "amber"),
        ("amber-aux", "amber-aux"),
        ("cns", "cns"),
        ("cyana", "cyana"),
        ("xplor", "xplor"),
        ("xplor-nih", "xplor-nih"),
        ("pdb-mr", "mr"),
        ("mr", "mr"),
        ("json", "json"),
        ("fsa", "fsa"),
        ("fasta", "fasta"),
        ("any", "dat"),
        ("mdl", "mdl"),
        ("tar", "tar"),
    ]
    .into_iter()
    .map(|(format, ext)| (format.to_string(), ext.to_string()))
    .collect()
}

/// Default milestones.
pub fn default_milestones() -> Vec<String> {
    ["upload", "upload-convert", "deposit", "annotate", "release", "review"]
        .into_iter()
        .map(String::from)
        .collect()
}
