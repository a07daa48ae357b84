//! Unit tests for configuration and graceful degradation
//!
//! - Missing TOML files never cause termination
//! - Missing configs fall back to warnings + defaults + startup
//! - Default root folder locations per platform
//! - Priority order for root folder resolution
//! - Automatic directory creation
//!
//! Note: Uses the serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SIGNCAST_ROOT_FOLDER or SIGNCAST_ROOT are marked
//! with #[serial] so they run sequentially, not in parallel.

use serial_test::serial;
use signcast_common::config::{
    CompiledDefaults, ConfigOverrides, GeocodingConfig, LoggingConfig, RootFolderInitializer,
    RootFolderResolver, TomlConfig,
};
use std::env;
use std::path::PathBuf;

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert_eq!(defaults.log_level, "info");
    assert!(defaults.log_file.is_none());

    let path_str = defaults.root_folder.to_string_lossy();
    assert!(
        path_str.contains("signcast"),
        "default root should be a signcast directory: {}",
        path_str
    );
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var("SIGNCAST_ROOT_FOLDER");
    env::remove_var("SIGNCAST_ROOT");

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert!(!root_folder.as_os_str().is_empty());

    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(root_folder, defaults.root_folder);
}

#[test]
#[serial]
fn test_resolver_env_var_signcast_root_folder() {
    let test_path = "/tmp/signcast-test-env-folder";
    env::set_var("SIGNCAST_ROOT_FOLDER", test_path);

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert_eq!(root_folder, PathBuf::from(test_path));

    env::remove_var("SIGNCAST_ROOT_FOLDER");
}

#[test]
#[serial]
fn test_resolver_env_var_signcast_root() {
    env::remove_var("SIGNCAST_ROOT_FOLDER");

    let test_path = "/tmp/signcast-test-env-root";
    env::set_var("SIGNCAST_ROOT", test_path);

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert_eq!(root_folder, PathBuf::from(test_path));

    env::remove_var("SIGNCAST_ROOT");
}

#[test]
#[serial]
fn test_resolver_root_folder_var_takes_precedence() {
    env::remove_var("SIGNCAST_ROOT_FOLDER");
    env::remove_var("SIGNCAST_ROOT");

    env::set_var("SIGNCAST_ROOT_FOLDER", "/tmp/signcast-priority-1");
    env::set_var("SIGNCAST_ROOT", "/tmp/signcast-priority-2");

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/signcast-priority-1"));

    env::remove_var("SIGNCAST_ROOT_FOLDER");
    env::remove_var("SIGNCAST_ROOT");
}

#[test]
#[serial]
fn test_resolver_missing_config_file_does_not_error() {
    env::remove_var("SIGNCAST_ROOT_FOLDER");
    env::remove_var("SIGNCAST_ROOT");

    // A module name that definitely has no config file
    let resolver = RootFolderResolver::new("nonexistent-test-module-12345");
    let root_folder = resolver.resolve();

    assert!(!root_folder.as_os_str().is_empty());

    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(root_folder, defaults.root_folder);
}

#[test]
fn test_initializer_config_file_path() {
    let root = PathBuf::from("/tmp/signcast-test-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert_eq!(initializer.config_file_path(), root.join("signcast.toml"));
}

#[test]
fn test_initializer_creates_directory() {
    let test_dir = format!("/tmp/signcast-test-create-{}", std::process::id());
    let root = PathBuf::from(&test_dir);

    let _ = std::fs::remove_dir_all(&root);

    let initializer = RootFolderInitializer::new(root.clone());
    let result = initializer.ensure_directory_exists();

    assert!(result.is_ok(), "Failed to create directory: {:?}", result.err());
    assert!(root.exists(), "Directory was not created");
    assert!(root.is_dir(), "Created path is not a directory");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_initializer_idempotent_directory_creation() {
    let test_dir = format!("/tmp/signcast-test-idempotent-{}", std::process::id());
    let root = PathBuf::from(&test_dir);

    let _ = std::fs::remove_dir_all(&root);

    let initializer = RootFolderInitializer::new(root.clone());

    assert!(initializer.ensure_directory_exists().is_ok());
    assert!(initializer.ensure_directory_exists().is_ok());
    assert!(root.exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_initializer_nested_directory_creation() {
    let base = format!("/tmp/signcast-test-nested-{}", std::process::id());
    let root = PathBuf::from(&base).join("level1").join("level2");

    let _ = std::fs::remove_dir_all(&base);

    let initializer = RootFolderInitializer::new(root.clone());
    let result = initializer.ensure_directory_exists();

    assert!(result.is_ok(), "Failed to create nested directories: {:?}", result.err());
    assert!(root.exists(), "Nested directory was not created");

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_toml_roundtrip_with_access_token() {
    let config = TomlConfig {
        port: 6000,
        root_folder: Some(PathBuf::from("/srv/signcast")),
        logging: LoggingConfig::default(),
        geocoding: GeocodingConfig {
            access_token: Some("pk.test-token-123".to_string()),
            ..GeocodingConfig::default()
        },
    };

    let toml_str = toml::to_string(&config).unwrap();
    let parsed: TomlConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(parsed.port, 6000);
    assert_eq!(parsed.root_folder, Some(PathBuf::from("/srv/signcast")));
    assert_eq!(
        parsed.geocoding.access_token,
        Some("pk.test-token-123".to_string())
    );
}

#[test]
fn test_backward_compatible_missing_fields() {
    let toml_str = r#"
        port = 5999
        [logging]
        level = "debug"
    "#;

    let config: TomlConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.port, 5999);
    assert_eq!(config.logging.level, "debug");
    assert!(config.geocoding.access_token.is_none());
    assert_eq!(config.geocoding.country, "br");
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signcast.toml");

    let config = TomlConfig::load_or_default(&path);
    assert_eq!(config.port, 5780);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_or_default_unparseable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signcast.toml");
    std::fs::write(&path, "port = \"not a number").unwrap();

    // Never aborts startup: falls back to defaults
    let config = TomlConfig::load_or_default(&path);
    assert_eq!(config.port, 5780);
}

#[test]
fn test_load_or_default_reads_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signcast.toml");
    std::fs::write(
        &path,
        r#"
        port = 6100

        [geocoding]
        country = "us"
        "#,
    )
    .unwrap();

    let mut config = TomlConfig::load_or_default(&path);
    assert_eq!(config.port, 6100);
    assert_eq!(config.geocoding.country, "us");

    config.apply_overrides(&ConfigOverrides { port: Some(7000) });
    assert_eq!(config.port, 7000);
}
