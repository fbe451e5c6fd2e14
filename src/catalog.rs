//! Content catalog lookups.
//!
//! Translates the API vocabulary (content type names, content formats,
//! milestones) into the tokens used in repository file names, and checks
//! that a content type may be stored in a given format.

use crate::config::Config;
use crate::error::{DepotError, Result};
use crate::naming::FileSpec;

impl Config {
    /// Whether `content_type` may be stored as `format`.
    ///
    /// Unknown names on either side are simply unsupported.
    pub fn check_content_type_format(&self, content_type: &str, format: &str) -> bool {
        let Some(info) = self.content_types.get(content_type) else {
            tracing::info!(content_type, "content type not supported");
            return false;
        };
        if !self.format_extensions.contains_key(format) {
            tracing::info!(format, "content format not supported");
            return false;
        }
        let ok = info.formats.iter().any(|f| f == format);
        if !ok {
            tracing::info!(content_type, format, "content type does not support format");
        }
        ok
    }

    /// File extension for a content format, if the format is known.
    pub fn extension_for(&self, format: &str) -> Option<&str> {
        self.format_extensions.get(format).map(String::as_str)
    }

    /// Extension for `format`, also accepting a bare file extension such as
    /// `cif` in place of the format it belongs to.
    ///
    /// Returns the extension and whether `formats` may be stored with it.
    fn extension_for_any<'a>(
        &'a self,
        format: &'a str,
        formats: &[String],
    ) -> Option<(&'a str, bool)> {
        if let Some(ext) = self.extension_for(format) {
            return Some((ext, formats.iter().any(|f| f == format)));
        }
        if !self.format_extensions.values().any(|ext| ext == format) {
            return None;
        }
        tracing::debug!(format, "format given as a file extension");
        let supported = formats.iter().any(|f| self.extension_for(f) == Some(format));
        Some((format, supported))
    }

    /// Build the on-disk naming spec for a file described in API terms.
    ///
    /// `format` is a catalog format name (`pdbx`) or one of the catalog's
    /// file extensions (`cif`).
    pub fn file_spec(
        &self,
        id: &str,
        content_type: &str,
        part_number: u32,
        format: &str,
        milestone: Option<&str>,
    ) -> Result<FileSpec> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(DepotError::UserError(format!("invalid object id '{}'", id)));
        }
        if part_number == 0 {
            return Err(DepotError::UserError(
                "part number must be greater than 0".to_string(),
            ));
        }

        let info = self
            .content_types
            .get(content_type)
            .ok_or_else(|| DepotError::UnknownContentType(content_type.to_string()))?;
        let (extension, supported) = self
            .extension_for_any(format, &info.formats)
            .ok_or_else(|| DepotError::UnknownFormat(format.to_string()))?;
        if !supported {
            return Err(DepotError::UnsupportedFormat {
                content_type: content_type.to_string(),
                format: format.to_string(),
            });
        }

        let spec = FileSpec::new(id, info.file_token.as_str(), part_number, extension);
        match milestone.filter(|m| !m.is_empty()) {
            Some(m) if self.milestones.iter().any(|known| known == m) => Ok(spec.with_milestone(m)),
            Some(m) => Err(DepotError::UnknownMilestone(m.to_string())),
            None => Ok(spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_combination_passes() {
        let config = Config::default();
        assert!(config.check_content_type_format("model", "pdbx"));
        assert!(config.check_content_type_format("structure-factors", "mtz"));
    }

    #[test]
    fn unsupported_combinations_fail() {
        let config = Config::default();
        assert!(!config.check_content_type_format("model", "mtz"));
        assert!(!config.check_content_type_format("badType", "pdbx"));
        assert!(!config.check_content_type_format("model", "badFormat"));
        assert!(!config.check_content_type_format("", ""));
    }

    #[test]
    fn file_spec_uses_catalog_tokens() {
        let config = Config::default();
        let spec = config
            .file_spec("D_000", "structure-factors", 1, "pdbx", None)
            .unwrap();
        assert_eq!(spec.base_file_name(), "D_000_sf_P1.cif");
    }

    #[test]
    fn file_spec_accepts_known_milestone() {
        let config = Config::default();
        let spec = config
            .file_spec("D_000", "model", 1, "pdbx", Some("release"))
            .unwrap();
        assert_eq!(spec.base_file_name(), "D_000_model-release_P1.cif");

        // An empty milestone means none.
        let spec = config.file_spec("D_000", "model", 1, "pdbx", Some("")).unwrap();
        assert_eq!(spec.milestone, None);
    }

    #[test]
    fn file_spec_rejects_unknown_names() {
        let config = Config::default();

        let err = config.file_spec("D_000", "nope", 1, "pdbx", None).unwrap_err();
        assert!(matches!(err, DepotError::UnknownContentType(_)));

        let err = config.file_spec("D_000", "model", 1, "nope", None).unwrap_err();
        assert!(matches!(err, DepotError::UnknownFormat(_)));

        let err = config.file_spec("D_000", "model", 1, "mtz", None).unwrap_err();
        assert!(matches!(err, DepotError::UnsupportedFormat { .. }));

        let err = config
            .file_spec("D_000", "model", 1, "pdbx", Some("someday"))
            .unwrap_err();
        assert!(matches!(err, DepotError::UnknownMilestone(_)));
    }

    #[test]
    fn file_spec_accepts_file_extensions() {
        let config = Config::default();

        let spec = config.file_spec("D_000", "model", 1, "cif", None).unwrap();
        assert_eq!(spec.base_file_name(), "D_000_model_P1.cif");

        let spec = config.file_spec("D_000", "em-volume", 1, "mrc", None).unwrap();
        assert_eq!(spec.base_file_name(), "D_000_em-volume_P1.mrc");

        let err = config
            .file_spec("D_000", "structure-factors", 1, "str", None)
            .unwrap_err();
        assert!(matches!(err, DepotError::UnsupportedFormat { .. }));

        // Format names still win: `xml` is its own format, not pdbml's extension.
        let err = config.file_spec("D_000", "model", 1, "xml", None).unwrap_err();
        assert!(matches!(err, DepotError::UnsupportedFormat { .. }));
    }

    #[test]
    fn file_spec_rejects_path_like_ids_and_part_zero() {
        let config = Config::default();
        assert!(config.file_spec("../etc", "model", 1, "pdbx", None).is_err());
        assert!(config.file_spec("", "model", 1, "pdbx", None).is_err());
        assert!(config.file_spec("D_000", "model", 0, "pdbx", None).is_err());
    }
}
