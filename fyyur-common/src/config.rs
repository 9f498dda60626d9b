//! Configuration loading and database path resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument or environment variable (merged by the caller)
//! 2. TOML config file
//! 3. OS-dependent compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default HTTP port (matches the original development server)
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Database file name inside the data folder
pub const DATABASE_FILE_NAME: &str = "fyyur.db";

/// Tracing filter used when neither RUST_LOG nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "fyyur_web=info,fyyur_common=info,tower_http=info";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    pub database: Option<PathBuf>,
    /// Bind address for the HTTP server
    pub host: Option<String>,
    /// HTTP port
    pub port: Option<u16>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Tracing filter directive; RUST_LOG still takes precedence at startup
    pub log_level: String,
}

impl ServerConfig {
    /// Merge overrides, the optional TOML file and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database
                .or(file.database)
                .unwrap_or_else(default_database_path),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

/// Parse TOML config content
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content)
}

/// Load the TOML config from the platform location, if one exists
///
/// A missing file is normal; an unreadable or malformed file is logged and
/// ignored so the server still starts with defaults.
pub fn load_toml_config() -> Option<TomlConfig> {
    let path = config_file_path()?;
    debug!("Loading config file: {}", path.display());

    match read_toml_config(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

/// Locate the config file for the platform
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/fyyur/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join(DATABASE_FILE_NAME)
}
