//! Configuration loading and root folder resolution
//!
//! Tests that manipulate SKINSIGHT_ROOT_FOLDER are marked #[serial] so they
//! never race on the process environment.

use serial_test::serial;
use skinsight_common::config::{
    default_root_folder, RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV,
};
use skinsight_common::Error;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = RootFolderResolver::new().resolve();

    assert!(!root_folder.as_os_str().is_empty());
    assert_eq!(root_folder, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/skinsight-env-root");

    let root_folder = RootFolderResolver::new()
        .with_toml_value(Some(PathBuf::from("/tmp/skinsight-toml-root")))
        .resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/skinsight-env-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/skinsight-env-root");

    let root_folder = RootFolderResolver::new()
        .with_cli_override(Some(PathBuf::from("/tmp/skinsight-cli-root")))
        .resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/skinsight-cli-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_toml_used_without_env() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = RootFolderResolver::new()
        .with_toml_value(Some(PathBuf::from("/tmp/skinsight-toml-root")))
        .resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/skinsight-toml-root"));
}

#[test]
fn test_initializer_creates_layout() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("nested").join("root");

    let init = RootFolderInitializer::new(root.clone());
    init.ensure_directories().unwrap();

    assert!(root.is_dir());
    assert!(init.uploads_dir().is_dir());
    assert!(!init.users_db_path().exists());
}

#[test]
fn test_load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/skinsight"
port = 8088

[classifier]
confidence_threshold = 0.7

[logging]
level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(TomlConfig::locate(Some(&path)), Some(path.clone()));
    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/skinsight")));
    assert_eq!(config.port, 8088);
    assert_eq!(config.classifier.confidence_threshold, 0.7);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    match TomlConfig::load(&path) {
        Err(Error::Config { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_missing_explicit_file_is_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.toml");

    // An explicit path is used as given, so loading it reports the absence
    assert_eq!(TomlConfig::locate(Some(&missing)), Some(missing.clone()));
    assert!(TomlConfig::load(&missing).is_err());
}
