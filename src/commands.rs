//! Command handlers.
//!
//! The narrow surface front ends drive the engine through: send a definition,
//! save or delete one, read or replace the environment, list what is saved.
//! Outcomes carry a short label and a message ready for display.

use crate::builder::build_request;
use crate::config::{ConfigError, EngineConfig};
use crate::executor::{execute, ExecutionConfig};
use crate::models::{ErrorClass, ExecutionResult, RequestDefinition};
use crate::store::{RequestStore, StoreError};
use log::{info, warn};

/// Message shown after a definition is saved.
pub const REQUEST_SAVED: &str = "Request Saved Successfully";

/// Message shown after a definition is deleted.
pub const REQUEST_DELETED: &str = "Request Deleted Successfully";

/// Message shown after the environment is saved.
pub const ENVIRONMENT_SAVED: &str = "Environment Variables Saved Successfully";

/// Message shown when environment text is rejected.
pub const INVALID_ENVIRONMENT: &str = "Error: Invalid JSON structure";

/// Result of a store-backed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Failure class, [`ErrorClass::None`] on success.
    pub class: ErrorClass,

    /// Short label for a status slot. Empty on success.
    pub label: String,

    /// Message for display.
    pub message: String,
}

impl CommandOutcome {
    /// Creates a successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            class: ErrorClass::None,
            label: String::new(),
            message: message.into(),
        }
    }

    /// Creates a failed outcome.
    pub fn failure(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            label: class.label().to_string(),
            message: message.into(),
        }
    }

    /// Returns true if the command succeeded.
    pub fn is_success(&self) -> bool {
        !self.class.is_error()
    }
}

impl From<StoreError> for CommandOutcome {
    fn from(err: StoreError) -> Self {
        let class = err.error_class();
        let message = match err {
            StoreError::Validation { .. } => INVALID_ENVIRONMENT.to_string(),
            StoreError::NotFound(id) => format!("id not found: {}", id),
            other => other.to_string(),
        };
        CommandOutcome::failure(class, message)
    }
}

/// Engine entry points bound to one store and one execution configuration.
#[derive(Debug, Clone)]
pub struct Commands {
    store: RequestStore,
    config: ExecutionConfig,
}

impl Commands {
    /// Creates a command set over `store`.
    pub fn new(store: RequestStore, config: ExecutionConfig) -> Self {
        Self { store, config }
    }

    /// Creates a command set from engine configuration, opening the store at
    /// the configured (or platform default) path.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let store = RequestStore::new(config.store_path()?);
        Ok(Self::new(store, ExecutionConfig::from_engine_config(config)))
    }

    /// The underlying store.
    pub fn store(&self) -> &RequestStore {
        &self.store
    }

    /// Builds and sends `definition` using the saved environment.
    ///
    /// A definition that fails to build is reported as a configuration
    /// result with the build error as its body; nothing is sent.
    pub async fn send(&self, definition: &RequestDefinition) -> ExecutionResult {
        let environment = self.store.environment_text();
        match build_request(definition, &environment) {
            Ok(request) => execute(&request, &self.config).await,
            Err(err) => {
                warn!("Not sending '{}': {}", definition.name, err);
                ExecutionResult::failed(ErrorClass::Configuration, err.to_string())
            }
        }
    }

    /// Sends the saved definition with `id`.
    ///
    /// With `record_response`, the response body is written back onto the
    /// saved definition once the exchange completes.
    pub async fn send_saved(&self, id: &str, record_response: bool) -> ExecutionResult {
        let Some(mut definition) = self.store.get_request(id) else {
            return ExecutionResult::failed(ErrorClass::NotFound, format!("id not found: {}", id));
        };

        let result = self.send(&definition).await;
        if record_response && result.is_completed() {
            definition.response = result.body.clone();
            if let Err(e) = self.store.save_request(definition) {
                warn!("Failed to record response for {}: {}", id, e);
            }
        }
        result
    }

    /// Saves `definition`, assigning an id if it has none.
    pub fn save_request(&self, definition: RequestDefinition) -> CommandOutcome {
        match self.store.save_request(definition) {
            Ok(saved) => {
                info!("Request {} saved", saved.id);
                CommandOutcome::success(REQUEST_SAVED)
            }
            Err(err) => {
                let class = err.error_class();
                CommandOutcome::failure(class, format!("Failed to save request: {}", err))
            }
        }
    }

    /// Deletes the saved definition with `id`.
    pub fn delete_request(&self, id: &str) -> CommandOutcome {
        match self.store.delete_request(id) {
            Ok(()) => CommandOutcome::success(REQUEST_DELETED),
            Err(err) => err.into(),
        }
    }

    /// Current environment text, `"{}"` if none was saved.
    pub fn environment(&self) -> String {
        self.store.environment_text()
    }

    /// Validates and replaces the environment text.
    pub fn save_environment(&self, text: &str) -> CommandOutcome {
        match self.store.save_environment_text(text) {
            Ok(()) => CommandOutcome::success(ENVIRONMENT_SAVED),
            Err(err) => err.into(),
        }
    }

    /// Saved definitions in insertion order.
    pub fn list_requests(&self) -> Vec<RequestDefinition> {
        self.store.list_requests()
    }
}
