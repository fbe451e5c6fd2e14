//! Implementation of the `depot resolve` and `depot versions` commands.

use super::Session;
use crate::cli::{ResolveArgs, VersionsArgs};
use crate::error::{DepotError, Result};
use crate::mime::mime_type_for_format;
use crate::versions::{VersionScan, VersionToken, resolve_version, scan_versions};
use serde_json::json;
use std::path::PathBuf;

/// A resolved version of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub version: u32,
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolve `args.version` for the file named by `args.file`.
pub fn resolve_file(session: &Session, args: &ResolveArgs) -> Result<Resolved> {
    let token: VersionToken = args.version.parse()?;
    let (spec, repo_dir) = session.locate(&args.file)?;

    let path = resolve_version(token, &repo_dir, &spec)?;
    let version = parse_resolved_version(&path, &spec.version_prefix()).ok_or_else(|| {
        DepotError::UserError(format!("resolved path '{}' has no version suffix", path.display()))
    })?;

    Ok(Resolved {
        version,
        exists: path.is_file(),
        path,
    })
}

/// Version number carried by a path produced by the resolver.
fn parse_resolved_version(path: &std::path::Path, prefix: &str) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix(prefix)?
        .parse()
        .ok()
}

/// Execute the `depot resolve` command.
pub fn cmd_resolve(session: &Session, args: ResolveArgs) -> Result<()> {
    let resolved = resolve_file(session, &args)?;

    if args.json {
        let out = json!({
            "repository": args.file.repository,
            "id": args.file.id,
            "content_type": args.file.content_type,
            "format": args.file.format,
            "part": args.file.part,
            "milestone": args.file.milestone,
            "token": args.version,
            "version": resolved.version,
            "path": resolved.path,
            "exists": resolved.exists,
            "mime_type": mime_type_for_format(&session.config, &args.file.format),
        });
        println!("{}", out);
    } else {
        println!("{}", resolved.path.display());
    }

    Ok(())
}

/// List the versions of the file named by `args.file`.
///
/// A missing object directory lists as empty.
pub fn list_versions(session: &Session, args: &VersionsArgs) -> Result<VersionScan> {
    let (spec, repo_dir) = session.locate(&args.file)?;
    if !spec.object_dir(&repo_dir).exists() {
        return Ok(VersionScan::default());
    }
    scan_versions(&repo_dir, &spec)
}

/// Execute the `depot versions` command.
pub fn cmd_versions(session: &Session, args: VersionsArgs) -> Result<()> {
    let scan = list_versions(session, &args)?;

    if args.json {
        let out: Vec<_> = scan
            .entries
            .iter()
            .map(|e| json!({ "version": e.version, "path": e.path }))
            .collect();
        println!("{}", serde_json::Value::Array(out));
        return Ok(());
    }

    if scan.is_empty() {
        println!("No versions.");
        return Ok(());
    }

    for entry in &scan.entries {
        println!("V{:<4} {}", entry.version, entry.path.display());
    }
    if !scan.malformed.is_empty() {
        println!();
        println!("Skipped ({}):", scan.malformed.len());
        for entry in &scan.malformed {
            println!("  {} ({})", entry.name, entry.reason);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_session::{file_args, session_at};
    use crate::test_support::{touch, touch_versions};
    use tempfile::TempDir;

    fn resolve_args(version: &str) -> ResolveArgs {
        ResolveArgs {
            file: file_args("D_000", "model", "pdbx"),
            version: version.to_string(),
            json: false,
        }
    }

    #[test]
    fn test_resolve_latest_and_next() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());
        let (spec, repo_dir) = session.locate(&file_args("D_000", "model", "pdbx")).unwrap();
        touch_versions(&repo_dir, &spec, &[1, 2, 3]);

        let latest = resolve_file(&session, &resolve_args("latest")).unwrap();
        assert_eq!(latest.version, 3);
        assert!(latest.exists);
        assert_eq!(latest.path, repo_dir.join("D_000").join("D_000_model_P1.cif.V3"));

        let next = resolve_file(&session, &resolve_args("next")).unwrap();
        assert_eq!(next.version, 4);
        assert!(!next.exists);

        let first = resolve_file(&session, &resolve_args("first")).unwrap();
        assert_eq!(first.version, 1);

        let exact = resolve_file(&session, &resolve_args("7")).unwrap();
        assert_eq!(exact.version, 7);
        assert!(!exact.exists);
    }

    #[test]
    fn test_resolve_next_for_new_object() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());

        let next = resolve_file(&session, &resolve_args("next")).unwrap();
        assert_eq!(next.version, 1);
        assert!(next.path.ends_with("D_000/D_000_model_P1.cif.V1"));
    }

    #[test]
    fn test_resolve_errors_keep_their_kind() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());
        let (spec, repo_dir) = session.locate(&file_args("D_000", "model", "pdbx")).unwrap();
        touch_versions(&repo_dir, &spec, &[1]);

        let err = resolve_file(&session, &resolve_args("previous")).unwrap_err();
        assert!(matches!(err, DepotError::NoSuchVersion { available: 1, .. }));

        let err = resolve_file(&session, &resolve_args("newest")).unwrap_err();
        assert!(matches!(err, DepotError::UnknownVersionToken(_)));

        let mut args = resolve_args("latest");
        args.file.repository = "tempdep".to_string();
        let err = resolve_file(&session, &args).unwrap_err();
        assert!(matches!(err, DepotError::UnknownRepository(_)));
    }

    #[test]
    fn test_archive_versions_live_under_the_root() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());
        let object_dir = temp_dir.path().join("D_000");
        for v in 1..=3 {
            touch(&object_dir.join(format!("D_000_model_P1.cif.V{}", v)));
        }

        let mut args = resolve_args("latest");
        args.file.repository = "onedep-archive".to_string();
        let latest = resolve_file(&session, &args).unwrap();
        assert_eq!(latest.version, 3);
        assert_eq!(latest.path, object_dir.join("D_000_model_P1.cif.V3"));

        // Subdirectory names are not repository names.
        args.file.repository = "archive".to_string();
        let err = resolve_file(&session, &args).unwrap_err();
        assert!(matches!(err, DepotError::UnknownRepository(_)));
    }

    #[test]
    fn test_resolve_with_extension_as_format() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());
        let (spec, repo_dir) = session.locate(&file_args("D_000", "model", "pdbx")).unwrap();
        touch_versions(&repo_dir, &spec, &[1, 2]);

        let mut args = resolve_args("latest");
        args.file = file_args("D_000", "model", "cif");
        let latest = resolve_file(&session, &args).unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.path, spec.versioned_path(&repo_dir, 2));
    }

    #[test]
    fn test_list_versions() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_at(temp_dir.path());
        let args = VersionsArgs {
            file: file_args("D_000", "model", "pdbx"),
            json: false,
        };

        assert!(list_versions(&session, &args).unwrap().is_empty());

        let (spec, repo_dir) = session.locate(&args.file).unwrap();
        touch_versions(&repo_dir, &spec, &[2, 10]);
        touch(&spec.object_dir(&repo_dir).join("D_000_model_P1.cif.Vx"));

        let scan = list_versions(&session, &args).unwrap();
        let versions: Vec<u32> = scan.entries.iter().map(|e| e.version).collect();
        assert_eq!(versions, vec![10, 2]);
        assert_eq!(scan.malformed.len(), 1);
    }
}
