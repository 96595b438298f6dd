//! Configuration management for the request engine.
//!
//! Configuration is read from a settings object under the `"gostman"` key,
//! either handed over directly or loaded from a JSON file. There is no global
//! instance: callers own their [`EngineConfig`] and pass it where needed.

pub mod schema;

pub use schema::{default_store_path, ConfigError, EngineConfig};

use log::warn;
use serde_json::Value;
use std::path::Path;

/// Settings key holding the engine configuration.
pub const SETTINGS_KEY: &str = "gostman";

/// Loads configuration from a settings value.
///
/// Reads the `"gostman"` object if present. Settings that fail to deserialize
/// are ignored with a warning and the defaults are used instead.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the resulting configuration does not
/// validate.
///
/// # Example
///
/// ```
/// use gostman::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "gostman": {
///         "timeout": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// assert!(!config.validate_ssl);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<EngineConfig, ConfigError> {
    let mut config = EngineConfig::default();

    if let Some(settings) = settings_json {
        if let Some(engine_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<EngineConfig>(engine_settings.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config.validate()?;
    Ok(config)
}

/// Loads configuration from a JSON file.
///
/// The file may either wrap the settings in a `"gostman"` object or hold the
/// settings object directly.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = if value.get(SETTINGS_KEY).is_some() {
        value
    } else {
        let mut wrapped = serde_json::Map::new();
        wrapped.insert(SETTINGS_KEY.to_string(), value);
        Value::Object(wrapped)
    };
    load_config(Some(settings))
}
