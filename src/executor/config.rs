//! HTTP request execution configuration.

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default ceiling on a single exchange, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout.
    ///
    /// Maximum time to wait for a complete response (including connection,
    /// headers, and body download). Defaults to 30 seconds.
    pub timeout: Duration,

    /// Whether redirects are followed.
    pub follow_redirects: bool,

    /// Redirect hop limit when following.
    pub max_redirects: u32,

    /// Whether TLS certificates are validated.
    pub validate_ssl: bool,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout and default
    /// redirect and TLS behavior.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            follow_redirects: true,
            max_redirects: 10,
            validate_ssl: true,
        }
    }

    /// Derives the execution settings from an engine configuration.
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        Self {
            timeout: config.timeout_duration(),
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_config_default() {
        let config = ExecutionConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.follow_redirects);
        assert!(config.validate_ssl);
    }

    #[test]
    fn test_from_engine_config() {
        let engine = EngineConfig {
            timeout: 45_000,
            follow_redirects: false,
            ..EngineConfig::default()
        };
        let config = ExecutionConfig::from_engine_config(&engine);
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert!(!config.follow_redirects);
    }

    #[test]
    fn test_sub_second_timeout_kept() {
        let engine = EngineConfig {
            timeout: 500,
            ..EngineConfig::default()
        };
        let config = ExecutionConfig::from_engine_config(&engine);
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_default_matches_default_engine_config() {
        assert_eq!(
            ExecutionConfig::from_engine_config(&EngineConfig::default()),
            ExecutionConfig::default()
        );
    }

    #[test]
    fn test_serialization() {
        let config = ExecutionConfig::new(120);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("120"));

        let deserialized: ExecutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }
}
