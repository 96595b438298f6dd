//! Configuration schema for the request engine.
//!
//! Defines the user-configurable settings and their validation rules.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Folder under the platform data directory holding the saved document.
pub const DATA_DIR_NAME: &str = "Gostman";

/// File name of the saved document.
pub const STORE_FILE_NAME: &str = "gostman.json";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting holds a value outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither a configured store path nor a home directory is available.
    #[error("Cannot determine the data directory: neither {0} nor a store path is set")]
    NoDataDir(&'static str),
}

/// Engine configuration.
///
/// Read from the `"gostman"` key of a settings object. Missing settings fall
/// back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Request timeout in milliseconds.
    ///
    /// Ceiling on one exchange, body download included. Defaults to 30000ms.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates. Defaults to true.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Location of the saved document.
    ///
    /// When unset, the platform default from [`default_store_path`] is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            store_path: None,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Invalid(
                "timeout must be greater than 0".to_string(),
            ));
        }

        // max_redirects can be 0 (no redirects)

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Resolves where the saved document lives.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => default_store_path(),
        }
    }
}

/// Platform default location of the saved document.
///
/// `%APPDATA%\Gostman\gostman.json` on Windows,
/// `$HOME/.local/share/Gostman/gostman.json` elsewhere.
pub fn default_store_path() -> Result<PathBuf, ConfigError> {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .ok_or(ConfigError::NoDataDir("APPDATA"))?
    } else {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local").join("share"))
            .ok_or(ConfigError::NoDataDir("HOME"))?
    };
    Ok(base.join(DATA_DIR_NAME).join(STORE_FILE_NAME))
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}
