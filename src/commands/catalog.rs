//! Implementation of the `depot mime` and `depot check` commands.

use super::Session;
use crate::cli::{CheckArgs, MimeArgs};
use crate::error::{DepotError, Result};
use crate::mime::mime_type_for_format;

/// Execute the `depot mime` command.
pub fn cmd_mime(session: &Session, args: MimeArgs) -> Result<()> {
    println!("{}", mime_type_for_format(&session.config, &args.format));
    Ok(())
}

/// Check a content type / format pair, failing with the most specific error.
pub fn check_pair(session: &Session, args: &CheckArgs) -> Result<()> {
    let config = &session.config;
    if config.check_content_type_format(&args.content_type, &args.format) {
        return Ok(());
    }

    if !config.content_types.contains_key(&args.content_type) {
        Err(DepotError::UnknownContentType(args.content_type.clone()))
    } else if config.extension_for(&args.format).is_none() {
        Err(DepotError::UnknownFormat(args.format.clone()))
    } else {
        Err(DepotError::UnsupportedFormat {
            content_type: args.content_type.clone(),
            format: args.format.clone(),
        })
    }
}

/// Execute the `depot check` command.
pub fn cmd_check(session: &Session, args: CheckArgs) -> Result<()> {
    check_pair(session, &args)?;
    println!("{} supports {}", args.content_type, args.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_session::session_at;
    use std::path::Path;

    fn check(content_type: &str, format: &str) -> Result<()> {
        let session = session_at(Path::new("/unused"));
        check_pair(
            &session,
            &CheckArgs {
                content_type: content_type.to_string(),
                format: format.to_string(),
            },
        )
    }

    #[test]
    fn supported_pair_passes() {
        assert!(check("model", "pdbx").is_ok());
        assert!(check("em-volume", "map").is_ok());
    }

    #[test]
    fn failures_name_the_problem() {
        assert!(matches!(check("nope", "pdbx"), Err(DepotError::UnknownContentType(_))));
        assert!(matches!(check("model", "nope"), Err(DepotError::UnknownFormat(_))));
        assert!(matches!(check("model", "mtz"), Err(DepotError::UnsupportedFormat { .. })));
    }
}
