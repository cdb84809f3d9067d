//! Bootstrap configuration and root folder resolution
//!
//! Configuration is read once at startup from an optional TOML file. A
//! missing file is not an error: every field has a built-in default and the
//! service starts with a warning. A file that exists but cannot be parsed is
//! reported, since silently ignoring it would hide operator mistakes.
//!
//! # Root folder priority
//!
//! 1. Command-line argument (highest priority)
//! 2. `SKINSIGHT_ROOT_FOLDER` environment variable
//! 3. `root_folder` key in the TOML file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "SKINSIGHT_ROOT_FOLDER";

/// File name of the credential database inside the root folder
pub const USERS_DB_FILE: &str = "users.db";

/// Directory inside the root folder where uploads are staged
pub const UPLOADS_DIR: &str = "uploads";

/// Bootstrap configuration loaded from TOML
///
/// Cannot change while the service is running.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder holding `users.db` and the uploads directory
    pub root_folder: Option<PathBuf>,

    /// Interface the HTTP server binds to
    pub bind_address: String,

    /// HTTP server port
    pub port: u16,

    pub classifier: ClassifierConfig,

    pub session: SessionConfig,

    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            bind_address: "127.0.0.1".to_string(),
            port: 5780,
            classifier: ClassifierConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where and how the trained classifier is reached
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// TensorFlow Serving REST predict URL
    pub endpoint: String,

    /// Upper bound on one predict call
    pub timeout_ms: u64,

    /// Confidence below which a result is logged as uncertain.
    /// Never changes which labels are returned.
    pub confidence_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8501/v1/models/skin_lesion:predict".to_string(),
            timeout_ms: 30_000,
            confidence_threshold: 0.5,
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Client session limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions untouched for this long are discarded
    pub idle_timeout_secs: u64,

    /// Largest accepted request body (uploads included)
    pub max_upload_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 30 * 60,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse a configuration file that is known to exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Configuration file to use, if any
    ///
    /// An explicitly requested path is returned as is (loading it reports a
    /// missing file). Without one, the first existing path from
    /// [`default_config_paths`] is chosen.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_paths().into_iter().find(|p| p.exists()),
        }
    }
}

/// Candidate configuration file locations, highest priority first
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("skinsight").join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        paths.push(PathBuf::from("/etc/skinsight/config.toml"));
    }
    paths
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("skinsight"))
        .unwrap_or_else(|| PathBuf::from("./skinsight_data"))
}

/// Resolves the root folder from CLI, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_override: Option<PathBuf>,
    toml_value: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli_override(mut self, path: Option<PathBuf>) -> Self {
        self.cli_override = path;
        self
    }

    pub fn with_toml_value(mut self, path: Option<PathBuf>) -> Self {
        self.toml_value = path;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_override {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_value {
            return path.clone();
        }

        default_root_folder()
    }
}

/// Creates the root folder layout and names the files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root and uploads directories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    pub fn users_db_path(&self) -> PathBuf {
        self.root.join(USERS_DB_FILE)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5780);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.classifier.confidence_threshold, 0.5);
        assert_eq!(config.session.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 6000

            [classifier]
            endpoint = "http://models:8501/v1/models/derm:predict"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.classifier.endpoint, "http://models:8501/v1/models/derm:predict");
        assert_eq!(config.classifier.timeout(), Duration::from_secs(30));
        assert_eq!(config.session.idle_timeout(), Duration::from_secs(1800));
    }

    #[test]
    fn test_initializer_paths() {
        let init = RootFolderInitializer::new(PathBuf::from("/srv/skinsight"));
        assert_eq!(init.users_db_path(), PathBuf::from("/srv/skinsight/users.db"));
        assert_eq!(init.uploads_dir(), PathBuf::from("/srv/skinsight/uploads"));
    }
}
