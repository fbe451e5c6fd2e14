//! MIME type lookup for repository content formats.

use crate::config::Config;

/// Fallback for formats with no specific mapping.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// MIME type for a file extension.
pub fn mime_type(extension: &str) -> &'static str {
    match extension {
        "cif" => "chemical/x-mmcif",
        "pdf" => "application/pdf",
        "xml" => "application/xml",
        "json" => "application/json",
        "txt" => "text/plain",
        "pic" => "application/octet-stream",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// MIME type for a content format, mapping it through the catalog's
/// extension table first (`pdbx` is stored as `cif`, `pdbml` as `xml`).
pub fn mime_type_for_format(config: &Config, format: &str) -> &'static str {
    mime_type(config.extension_for(format).unwrap_or(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_mime_types() {
        assert_eq!(mime_type("cif"), "chemical/x-mmcif");
        assert_eq!(mime_type("pdf"), "application/pdf");
        assert_eq!(mime_type("xml"), "application/xml");
        assert_eq!(mime_type("json"), "application/json");
        assert_eq!(mime_type("txt"), "text/plain");
        assert_eq!(mime_type("pic"), "application/octet-stream");
    }

    #[test]
    fn unknown_extension_defaults_to_text() {
        assert_eq!(mime_type("other"), "text/plain");
        assert_eq!(mime_type(""), "text/plain");
    }

    #[test]
    fn formats_are_mapped_through_the_catalog() {
        let config = Config::default();
        assert_eq!(mime_type_for_format(&config, "pdbx"), "chemical/x-mmcif");
        assert_eq!(mime_type_for_format(&config, "pdbml"), "application/xml");
        assert_eq!(mime_type_for_format(&config, "cif"), "chemical/x-mmcif");
        assert_eq!(mime_type_for_format(&config, "mtz"), "text/plain");
    }
}
