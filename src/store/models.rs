//! Data models for the persistent store.

use crate::models::{ErrorClass, RequestDefinition};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment text reported when none has been saved.
pub const EMPTY_ENVIRONMENT: &str = "{}";

/// The single on-disk aggregate: environment text plus saved definitions.
///
/// The environment stays raw text so a partially invalid body survives a
/// round trip until the user fixes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDocument {
    /// Environment as JSON-object text.
    #[serde(rename = "variables", default, deserialize_with = "null_as_default")]
    pub environment_text: String,

    /// Saved definitions in insertion order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests: Vec<RequestDefinition>,
}

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for SavedDocument {
    fn default() -> Self {
        Self {
            environment_text: EMPTY_ENVIRONMENT.to_string(),
            requests: Vec::new(),
        }
    }
}

impl SavedDocument {
    /// Finds the position of the definition with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.requests.iter().position(|r| r.id == id)
    }

    /// Finds the definition with `id`.
    pub fn find(&self, id: &str) -> Option<&RequestDefinition> {
        self.requests.iter().find(|r| r.id == id)
    }
}

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No saved definition has the given id.
    #[error("Request not found: {0}")]
    NotFound(String),

    /// Environment text rejected on save.
    #[error("Invalid JSON structure at line {line}, column {column}: {message}")]
    Validation {
        message: String,
        line: usize,
        column: usize,
    },

    /// The backing file exists but could not be read or parsed.
    #[error("Saved data at {} is unreadable: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// Writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Class reported to callers for this error.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            StoreError::NotFound(_) => ErrorClass::NotFound,
            StoreError::Validation { .. } => ErrorClass::Validation,
            StoreError::Unreadable { .. } | StoreError::Io(_) | StoreError::Serialization(_) => {
                ErrorClass::Storage
            }
        }
    }
}
