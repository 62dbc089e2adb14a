//! Configuration management for the portal.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "portal";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "portal.db";

/// Administrator login compiled into the binary.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Administrator password compiled into the binary.
pub const DEFAULT_ADMIN_PASSWORD: &str = "cpsu1922";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PORTAL_`, sections split by `__`)
/// 2. TOML config file at `~/.config/portal/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Administrator credentials.
    pub auth: AuthConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/portal/portal.db`
    pub database_path: Option<PathBuf>,
    /// Keep everything in memory; nothing survives the process.
    pub in_memory: bool,
}

/// Administrator credential pair checked by the session gate.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Administrator login.
    pub username: String,
    /// Administrator password.
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("PORTAL_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.auth.username.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "auth.username must not be empty".to_string(),
            });
        }

        if self.auth.password.is_empty() {
            return Err(Error::ConfigValidation {
                message: "auth.password must not be empty".to_string(),
            });
        }

        if self.storage.in_memory && self.storage.database_path.is_some() {
            return Err(Error::ConfigValidation {
                message: "storage.in_memory cannot be combined with storage.database_path"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(!config.storage.in_memory);
        assert_eq!(config.auth.username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(config.auth.password, DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_username() {
        let mut config = Config::default();
        config.auth.username = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("auth.username"));
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = Config::default();
        config.auth.password = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("auth.password"));
    }

    #[test]
    fn test_validate_in_memory_with_path() {
        let mut config = Config::default();
        config.storage.in_memory = true;
        config.storage.database_path = Some(PathBuf::from("/tmp/portal.db"));

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("in_memory"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("portal.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_auth_debug_hides_password() {
        let debug_str = format!("{:?}", AuthConfig::default());
        assert!(debug_str.contains("admin"));
        assert!(!debug_str.contains(DEFAULT_ADMIN_PASSWORD));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("portal"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndatabase_path = \"/srv/portal.db\"\n\n[auth]\nusername = \"narkom\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/srv/portal.db"))
        );
        assert_eq!(config.auth.username, "narkom");
        assert_eq!(config.auth.password, DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"in_memory": true}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert!(storage.in_memory);
        assert!(storage.database_path.is_none());
    }
}
