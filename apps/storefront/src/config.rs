//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITRINE_PORT=8080                                                  │
//! │     VITRINE_ADMIN_PASSWORD=...                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vitrine/storefront.toml (Linux)                          │
//! │     ~/Library/Application Support/com.vitrine.vitrine/storefront.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! backend = "file"        # file | sqlite | memory
//! data_dir = "/var/lib/vitrine"
//! database_path = "/var/lib/vitrine/vitrine.db"
//!
//! [admin]
//! password = "change-me"
//! session_ttl_minutes = 480
//!
//! [catalog]
//! seed_demo_catalog = true
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Password used when nothing is configured. Startup logs a warning.
pub const DEFAULT_ADMIN_PASSWORD: &str = "vitrine-admin";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Which key-value backend holds the two storefront documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in `data_dir`.
    #[default]
    File,
    /// `kv_store` table in `database_path`.
    Sqlite,
    /// Nothing survives a restart.
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue(format!("storage.backend = {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Defaults to `<data_dir>/vitrine.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default = "default_admin_password")]
    pub password: String,

    /// Idle sessions are never expired when unset.
    #[serde(default)]
    pub session_ttl_minutes: Option<u32>,
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

impl Default for AdminSettings {
    fn default() -> Self {
        AdminSettings {
            password: default_admin_password(),
            session_ttl_minutes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Start with three demo products when nothing is stored yet.
    #[serde(default)]
    pub seed_demo_catalog: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub admin: AdminSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.password.is_empty() {
            return Err(ConfigError::InvalidValue("admin.password".into()));
        }
        if self.admin.session_ttl_minutes == Some(0) {
            return Err(ConfigError::InvalidValue(
                "admin.session_ttl_minutes must be greater than 0".into(),
            ));
        }
        if self.admin.password == DEFAULT_ADMIN_PASSWORD {
            warn!("Admin password is the built-in default; set VITRINE_ADMIN_PASSWORD");
        }
        Ok(())
    }

    /// Applies `VITRINE_*` overrides read through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("VITRINE_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("VITRINE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VITRINE_PORT".into()))?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(backend) = lookup("VITRINE_STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }

        if let Some(dir) = lookup("VITRINE_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(path) = lookup("VITRINE_DATABASE_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(password) = lookup("VITRINE_ADMIN_PASSWORD") {
            self.admin.password = password;
        }

        if let Some(ttl) = lookup("VITRINE_SESSION_TTL_MINUTES") {
            self.admin.session_ttl_minutes = Some(
                ttl.parse()
                    .map_err(|_| ConfigError::InvalidValue("VITRINE_SESSION_TTL_MINUTES".into()))?,
            );
        }

        if let Some(seed) = lookup("VITRINE_SEED_DEMO_CATALOG") {
            self.catalog.seed_demo_catalog = matches!(
                seed.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(())
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "vitrine", "vitrine")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Directory for the JSON file backend.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// SQLite file for the sqlite backend.
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join("vitrine.db"))
    }

    pub fn session_ttl(&self) -> Option<chrono::Duration> {
        self.admin
            .session_ttl_minutes
            .map(|minutes| chrono::Duration::minutes(i64::from(minutes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(!config.catalog.seed_demo_catalog);
        assert!(config.session_ttl().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [storage]
            backend = "sqlite"
            database_path = "/tmp/v.db"

            [admin]
            password = "s3cret"
            session_ttl_minutes = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/v.db"));
        assert_eq!(config.admin.password, "s3cret");
        assert_eq!(config.session_ttl(), Some(chrono::Duration::minutes(30)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("VITRINE_PORT", "9090"),
            ("VITRINE_STORAGE_BACKEND", "memory"),
            ("VITRINE_ADMIN_PASSWORD", "from-env"),
            ("VITRINE_SEED_DEMO_CATALOG", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.admin.password, "from-env");
        assert!(config.catalog.seed_demo_catalog);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = StorefrontConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "VITRINE_PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();
        config.admin.password = String::new();
        assert!(config.validate().is_err());

        config.admin.password = "x".to_string();
        config.admin.session_ttl_minutes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
    }
}
