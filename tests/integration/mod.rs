//! Integration tests module for the Gostman engine
//!
//! Shared helpers for tests that drive the engine end to end against a
//! temporary store and a mock HTTP server.

pub mod pipeline_test;
pub mod store_test;

use gostman::commands::Commands;
use gostman::executor::ExecutionConfig;
use gostman::store::RequestStore;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A store in a fresh temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn temp_store() -> (TempDir, RequestStore) {
    init_test_env();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = RequestStore::new(dir.path().join("gostman.json"));
    (dir, store)
}

/// Commands over a fresh temporary store with default execution settings.
pub fn temp_commands() -> (TempDir, Commands) {
    let (dir, store) = temp_store();
    (dir, Commands::new(store, ExecutionConfig::default()))
}
