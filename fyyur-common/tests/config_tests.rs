//! Unit tests for configuration resolution
//!
//! Priority order: overrides (CLI/env) > TOML file > compiled defaults.
//! Missing or partial TOML files never prevent startup.

use fyyur_common::config::{
    default_database_path, read_toml_config, ConfigOverrides, ServerConfig, TomlConfig,
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT,
};
use std::path::PathBuf;

#[test]
fn test_defaults_when_nothing_configured() {
    let config = ServerConfig::resolve(ConfigOverrides::default(), None);

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.database_path, default_database_path());
    assert_eq!(config.log_level, DEFAULT_LOG_FILTER);
}

#[test]
fn test_toml_values_used_when_no_overrides() {
    let file = TomlConfig {
        database: Some(PathBuf::from("/srv/fyyur/fyyur.db")),
        host: Some("0.0.0.0".to_string()),
        port: Some(8080),
        log_level: Some("debug".to_string()),
    };

    let config = ServerConfig::resolve(ConfigOverrides::default(), Some(file));

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_path, PathBuf::from("/srv/fyyur/fyyur.db"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_overrides_beat_toml() {
    let file = TomlConfig {
        database: Some(PathBuf::from("/srv/fyyur/fyyur.db")),
        port: Some(8080),
        ..Default::default()
    };
    let overrides = ConfigOverrides {
        database: Some(PathBuf::from("/tmp/override.db")),
        host: None,
        port: Some(9000),
    };

    let config = ServerConfig::resolve(overrides, Some(file));

    assert_eq!(config.port, 9000);
    assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.host, DEFAULT_HOST);
}

#[test]
fn test_read_toml_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "database = \"/data/fyyur.db\"\nport = 5050\n").unwrap();

    let file = read_toml_config(&path).unwrap();
    assert_eq!(file.database, Some(PathBuf::from("/data/fyyur.db")));
    assert_eq!(file.port, Some(5050));
    assert!(file.host.is_none());
}

#[test]
fn test_read_missing_toml_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_toml_config(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(fyyur_common::Error::Io(_))));
}
