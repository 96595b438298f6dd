//! Store integration tests
//!
//! Persistence across store handles, concurrent mutation, and the error
//! policy for unreadable files.

use super::temp_store;
use gostman::models::RequestDefinition;
use gostman::store::{RequestStore, StoreError};
use std::fs;
use std::thread;

#[test]
fn test_saved_data_visible_to_new_handle() {
    let (_dir, store) = temp_store();
    let saved = store
        .save_request(RequestDefinition::new("a", "GET", "http://localhost/a"))
        .unwrap();
    store.save_environment_text(r#"{"k": "v"}"#).unwrap();

    let reopened = RequestStore::new(store.path());
    assert_eq!(reopened.list_requests(), vec![saved]);
    assert_eq!(reopened.environment_text(), r#"{"k": "v"}"#);
}

#[test]
fn test_resave_keeps_count() {
    let (_dir, store) = temp_store();
    let first = store
        .save_request(RequestDefinition::new("a", "GET", "http://localhost/a"))
        .unwrap();
    let second = store
        .save_request(RequestDefinition::new("b", "GET", "http://localhost/b"))
        .unwrap();
    assert_ne!(first.id, second.id);

    let mut renamed = first.clone();
    renamed.name = "renamed".to_string();
    store.save_request(renamed).unwrap();

    let requests = store.list_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].name, "renamed");
    assert_eq!(requests[0].id, first.id);
}

#[test]
fn test_delete_unknown_id_is_byte_identical() {
    let (_dir, store) = temp_store();
    store
        .save_request(RequestDefinition::new("a", "GET", "http://localhost/a"))
        .unwrap();
    let before = fs::read(store.path()).unwrap();

    assert!(matches!(
        store.delete_request("does-not-exist"),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_delete_against_unreadable_file() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), "][").unwrap();

    // Display degrades, delete does not.
    assert!(store.list_requests().is_empty());
    assert!(matches!(
        store.delete_request("a"),
        Err(StoreError::Unreadable { .. })
    ));
}

#[test]
fn test_rejected_environment_keeps_file() {
    let (_dir, store) = temp_store();
    store.save_environment_text(r#"{"a": "1"}"#).unwrap();
    let before = fs::read(store.path()).unwrap();

    let err = store.save_environment_text("{not json}").unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_concurrent_saves_from_separate_handles() {
    let (_dir, store) = temp_store();
    let path = store.path().to_path_buf();

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let path = path.clone();
            thread::spawn(move || {
                // Each thread opens its own handle on the same path.
                let store = RequestStore::new(path);
                for i in 0..10 {
                    store
                        .save_request(RequestDefinition::new(
                            format!("t{}-{}", t, i),
                            "GET",
                            "http://localhost/",
                        ))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let requests = store.list_requests();
    assert_eq!(requests.len(), 100);

    let mut ids: Vec<_> = requests.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_concurrent_environment_and_request_writes() {
    let (_dir, store) = temp_store();

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..20 {
                store
                    .save_environment_text(&format!(r#"{{"round": "{}"}}"#, i))
                    .unwrap();
            }
        })
    };
    let saver = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..20 {
                store
                    .save_request(RequestDefinition::new(
                        format!("r{}", i),
                        "GET",
                        "http://localhost/",
                    ))
                    .unwrap();
            }
        })
    };
    writer.join().unwrap();
    saver.join().unwrap();

    assert_eq!(store.list_requests().len(), 20);
    assert_eq!(store.environment_text(), r#"{"round": "19"}"#);
}
