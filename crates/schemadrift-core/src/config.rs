//! Configuration schema (schemadrift.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection configuration for one database
///
/// Settings are engine-specific key/value pairs, e.g. for postgres either a
/// single `connection_string` or host/port/dbname/user/password, plus an
/// optional `schema` namespace and `sslmode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database engine type (e.g. "postgres")
    #[serde(rename = "type")]
    pub db_type: String,

    /// Connection settings (engine-specific)
    #[serde(flatten)]
    pub settings: HashMap<String, String>,
}

impl DatabaseConfig {
    /// Get a setting by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(|s| s.as_str())
    }
}

/// Main configuration structure
///
/// Scalar fields stay ahead of the database tables so the struct
/// serializes to valid TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Abort on the first per-table query error instead of recording it
    /// and continuing
    #[serde(default)]
    pub strict: bool,

    /// First database (e.g. staging)
    pub database1: DatabaseConfig,

    /// Second database (e.g. production)
    pub database2: DatabaseConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
