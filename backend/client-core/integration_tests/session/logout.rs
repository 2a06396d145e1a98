use crate::helpers::{api_for, session_for, stored_token};

use client_core::TOKEN_STORAGE_KEY;
use client_core::session::SessionStore;
use client_core::storage::{FileStorage, KeyValueStorage, MemoryStorage};

use std::sync::Arc;

use tempfile::tempdir;
use wiremock::MockServer;

/// **VALUE**: Verifies logout clears memory, storage and notifies subscribers.
///
/// **BUG THIS CATCHES**: Would catch logout leaving the persisted token so the
/// user is signed back in on the next start.
#[tokio::test]
async fn given_active_session_when_logging_out_then_token_absent_everywhere() {
    // GIVEN: A restored session backed by a file
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().join("storage.json")));
    storage.set(TOKEN_STORAGE_KEY, "T1").unwrap();
    let session = session_for(&server, storage.clone());
    let mut changes = session.subscribe();
    assert!(session.is_authenticated());

    // WHEN: Logging out
    session.logout();

    // THEN: No token anywhere
    assert_eq!(session.token(), None);
    assert_eq!(stored_token(storage.as_ref()), None);
    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().is_none());
}

/// **VALUE**: Verifies logout without a session is harmless.
#[tokio::test]
async fn given_no_session_when_logging_out_then_still_signed_out() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::restore(api_for(&server), storage.clone());

    session.logout();
    session.logout();

    assert!(!session.is_authenticated());
    assert_eq!(stored_token(storage.as_ref()), None);
}

/// **VALUE**: Verifies logout clears a corrupted storage file.
///
/// **BUG THIS CATCHES**: Would catch the corrupt file surviving logout, which
/// leaves the persisted entry in an undefined state.
#[tokio::test]
async fn given_corrupted_storage_file_when_logging_out_then_storage_reads_empty() {
    // GIVEN: A truncated storage file
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ truncated").unwrap();
    let storage = Arc::new(FileStorage::new(&path));
    let session = session_for(&server, storage.clone());

    // WHEN: Logging out
    session.logout();

    // THEN: Storage is readable and holds no token
    assert!(!session.is_authenticated());
    assert_eq!(stored_token(storage.as_ref()), None);
}
