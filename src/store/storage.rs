//! File-backed store for saved requests and the environment.
//!
//! Every operation is a whole-document read-modify-write of one JSON file.
//! Stores sharing a path share one reader/writer lock from a process-wide
//! registry, so mutations from concurrent callers never interleave.
//! Writes go to a sibling temp file that is then renamed over the target.

use super::models::{SavedDocument, StoreError, EMPTY_ENVIRONMENT};
use crate::models::RequestDefinition;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock registry keyed by backing-file path.
static LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<RwLock<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lock_for(path: &Path) -> Arc<RwLock<()>> {
    let mut locks = LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    locks.entry(path.to_path_buf()).or_default().clone()
}

/// Handle on the saved document at one path.
///
/// Cheap to clone; clones share the lock.
#[derive(Debug, Clone)]
pub struct RequestStore {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl RequestStore {
    /// Creates a store backed by `path`. The file is not touched until the
    /// first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock = lock_for(&path);
        Self { path, lock }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the saved document for display.
    ///
    /// Never fails: a missing, unreadable or empty file is an empty document,
    /// and a malformed file yields whatever entries still deserialize.
    pub fn load(&self) -> SavedDocument {
        let _guard = self.read_guard();
        load_tolerant(&self.path)
    }

    /// Replaces the saved document wholesale.
    pub fn store(&self, document: &SavedDocument) -> Result<(), StoreError> {
        let _guard = self.write_guard();
        write_document(&self.path, document)
    }

    /// Lists saved definitions in insertion order.
    pub fn list_requests(&self) -> Vec<RequestDefinition> {
        self.load().requests
    }

    /// Looks up one saved definition.
    pub fn get_request(&self, id: &str) -> Option<RequestDefinition> {
        self.load().find(id).cloned()
    }

    /// Saves a definition and returns it as stored.
    ///
    /// An empty id is replaced by a fresh UUID and the definition appended.
    /// A known id is overwritten in place. An unknown non-empty id is
    /// appended as is.
    pub fn save_request(
        &self,
        mut definition: RequestDefinition,
    ) -> Result<RequestDefinition, StoreError> {
        let _guard = self.write_guard();
        let mut document = load_tolerant(&self.path);

        if !definition.is_saved() {
            definition.id = uuid::Uuid::new_v4().to_string();
            debug!("Assigned id {} to request '{}'", definition.id, definition.name);
            document.requests.push(definition.clone());
        } else if let Some(index) = document.position(&definition.id) {
            document.requests[index] = definition.clone();
        } else {
            debug!("No saved request with id {}, appending", definition.id);
            document.requests.push(definition.clone());
        }

        write_document(&self.path, &document)?;
        info!("Saved request '{}' ({})", definition.name, definition.id);
        Ok(definition)
    }

    /// Removes the definition with `id`.
    ///
    /// Reads strictly: a backing file that exists but cannot be read or
    /// parsed is reported as [`StoreError::Unreadable`] instead of being
    /// treated as empty. The file is left untouched when nothing matches.
    pub fn delete_request(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_guard();
        let mut document = load_strict(&self.path)?;

        let index = document
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = document.requests.remove(index);

        write_document(&self.path, &document)?;
        info!("Deleted request '{}' ({})", removed.name, removed.id);
        Ok(())
    }

    /// Returns the stored environment text, or `"{}"` if none was saved.
    pub fn environment_text(&self) -> String {
        self.load().environment_text
    }

    /// Validates and replaces the environment text.
    ///
    /// The text must be a JSON object of string values. On failure nothing is
    /// written and the error carries the position of the first problem.
    pub fn save_environment_text(&self, text: &str) -> Result<(), StoreError> {
        validate_environment(text)?;

        let _guard = self.write_guard();
        let mut document = load_tolerant(&self.path);
        document.environment_text = text.to_string();
        write_document(&self.path, &document)?;
        info!("Saved environment ({} bytes)", text.len());
        Ok(())
    }
}

/// Checks that `text` is a JSON object mapping names to strings.
pub fn validate_environment(text: &str) -> Result<(), StoreError> {
    serde_json::from_str::<HashMap<String, String>>(text)
        .map(|_| ())
        .map_err(|e| StoreError::Validation {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })
}

/// Reads the backing file, `None` when it does not exist.
fn read_text(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn normalize(mut document: SavedDocument) -> SavedDocument {
    if document.environment_text.trim().is_empty() {
        document.environment_text = EMPTY_ENVIRONMENT.to_string();
    }
    document
}

fn load_tolerant(path: &Path) -> SavedDocument {
    let text = match read_text(path) {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => return SavedDocument::default(),
        Err(e) => {
            warn!("Failed to read {}: {}. Using an empty document.", path.display(), e);
            return SavedDocument::default();
        }
    };

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse {}: {}. Using an empty document.", path.display(), e);
            return SavedDocument::default();
        }
    };

    let Value::Object(mut root) = value else {
        warn!("{} does not hold a JSON object. Using an empty document.", path.display());
        return SavedDocument::default();
    };

    let environment_text = match root.remove("variables") {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            warn!("Ignoring non-string environment in {}: {}", path.display(), other);
            String::new()
        }
    };

    let mut requests = Vec::new();
    if let Some(Value::Array(items)) = root.remove("requests") {
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<RequestDefinition>(item) {
                Ok(definition) => requests.push(definition),
                Err(e) => warn!(
                    "Skipping malformed request #{} in {}: {}",
                    index,
                    path.display(),
                    e
                ),
            }
        }
    }

    normalize(SavedDocument {
        environment_text,
        requests,
    })
}

fn load_strict(path: &Path) -> Result<SavedDocument, StoreError> {
    let text = match read_text(path) {
        Ok(Some(text)) => text,
        Ok(None) => return Ok(SavedDocument::default()),
        Err(e) => {
            return Err(StoreError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(SavedDocument::default());
    }

    let document: SavedDocument =
        serde_json::from_str(&text).map_err(|e| StoreError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(normalize(document))
}

fn write_document(path: &Path, document: &SavedDocument) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(document)?;

    // Write to a temporary file first, then atomically replace the old file
    let temp_path = path.with_extension("json.tmp");
    let replaced = File::create(&temp_path)
        .and_then(|mut temp_file| {
            temp_file.write_all(json.as_bytes())?;
            temp_file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = replaced {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    debug!(
        "Wrote {} requests to {}",
        document.requests.len(),
        path.display()
    );
    Ok(())
}
