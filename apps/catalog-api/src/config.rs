//! Catalog API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Interface to bind
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8081,
            database_path: PathBuf::from("catalog.db"),
            max_connections: 5,
        }
    }
}

impl EndpointConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Same as [`EndpointConfig::load`] over an arbitrary variable source.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EndpointConfig::default();

        let config = EndpointConfig {
            bind_addr: lookup("CATALOG_API_BIND").unwrap_or(defaults.bind_addr),

            port: match lookup("CATALOG_API_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("CATALOG_API_PORT".to_string()))?,
                None => defaults.port,
            },

            database_path: lookup("CATALOG_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: match lookup("CATALOG_DB_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("CATALOG_DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.max_connections,
            },
        };

        if config.port == 0 {
            return Err(ConfigError::InvalidValue("CATALOG_API_PORT".to_string()));
        }
        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CATALOG_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// `bind_addr:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
