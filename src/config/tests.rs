//! Tests for config functionality.

use crate::config::Config;
use crate::config::types::{default_content_types, default_format_extensions};
use serial_test::serial;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.repository_path.is_none());
    assert_eq!(config.shared_lock_path, "locks");
    assert!(!config.split_repositories);
    assert_eq!(config.lock_max_wait_seconds, 10);
    assert_eq!(config.lock_retry_interval_ms, 1000);
    assert_eq!(config.lock_max_wait(), Duration::from_secs(10));
    assert_eq!(config.lock_retry_interval(), Duration::from_secs(1));
    assert!(config.content_types.contains_key("model"));
    assert_eq!(config.format_extensions.get("pdbx").map(String::as_str), Some("cif"));
    assert!(config.milestones.iter().any(|m| m == "release"));
}

#[test]
fn test_default_catalog_is_valid() {
    assert!(Config::default().validate().is_ok());

    let formats = default_format_extensions();
    for (name, info) in default_content_types() {
        for format in &info.formats {
            assert!(
                formats.contains_key(format),
                "content type {} uses unknown format {}",
                name,
                format
            );
        }
    }
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(config.lock_max_wait_seconds, 10);
    assert_eq!(config.shared_lock_path, "locks");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
repository_path: /data/onedep
lock_max_wait_seconds: 30
"#;
    let config = Config::from_yaml(yaml).unwrap();

    // Specified values should be used
    assert_eq!(config.repository_path.as_deref(), Some("/data/onedep"));
    assert_eq!(config.lock_max_wait_seconds, 30);

    // Unspecified values should use defaults
    assert_eq!(config.lock_retry_interval_ms, 1000);
    assert!(!config.split_repositories);
    assert!(config.content_types.contains_key("structure-factors"));
}

#[test]
fn test_parse_custom_catalog() {
    let yaml = r#"
content_types:
  model:
    file_token: model
    formats: [pdbx]
  map:
    file_token: em-map
    formats: [ccp4]
format_extensions:
  pdbx: cif
  ccp4: ccp4
milestones: [release]
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.content_types.len(), 2);
    assert_eq!(config.content_types["map"].file_token, "em-map");
    assert_eq!(config.format_extensions.len(), 2);
    assert_eq!(config.milestones, vec!["release"]);
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
lock_max_wait_seconds: 5
future_setting: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.lock_max_wait_seconds, 5);
}

#[test]
fn test_zero_retry_interval_rejected() {
    let err = Config::from_yaml("lock_retry_interval_ms: 0").unwrap_err();
    assert!(err.to_string().contains("lock_retry_interval_ms"));
}

#[test]
fn test_zero_max_wait_allowed() {
    // Zero means a single attempt.
    let config = Config::from_yaml("lock_max_wait_seconds: 0").unwrap();
    assert_eq!(config.lock_max_wait(), Duration::ZERO);
}

#[test]
fn test_extension_with_leading_dot_rejected() {
    let yaml = r#"
content_types: {}
format_extensions:
  pdbx: .cif
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("leading dot"));
}

#[test]
fn test_content_type_with_unknown_format_rejected() {
    let yaml = r#"
content_types:
  model:
    file_token: model
    formats: [pdbx, nope]
format_extensions:
  pdbx: cif
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("'nope'"));
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("lock_max_wait_seconds: [").unwrap_err();
    assert!(matches!(err, crate::error::DepotError::UserError(_)));
}

#[test]
fn test_yaml_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.repository_path = Some("/srv/repo".to_string());
    config.lock_max_wait_seconds = 42;

    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.repository_path.as_deref(), Some("/srv/repo"));
    assert_eq!(parsed.lock_max_wait_seconds, 42);
    assert_eq!(parsed.content_types, config.content_types);
}

#[test]
fn test_load_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("depot.yaml");
    std::fs::write(&path, "shared_lock_path: /tmp/depot-locks\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.shared_lock_path, "/tmp/depot-locks");
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
#[serial]
fn test_discover_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(&path, "lock_max_wait_seconds: 3\n").unwrap();

    let config = Config::discover(Some(&path)).unwrap();
    assert_eq!(config.lock_max_wait_seconds, 3);
}

#[test]
#[serial]
fn test_discover_uses_env_variable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env.yaml");
    std::fs::write(&path, "lock_max_wait_seconds: 7\n").unwrap();

    // SAFETY: serialized with the other environment-mutating tests.
    unsafe { std::env::set_var(super::CONFIG_ENV, &path) };
    let result = Config::discover(None);
    unsafe { std::env::remove_var(super::CONFIG_ENV) };

    assert_eq!(result.unwrap().lock_max_wait_seconds, 7);
}
