use crate::helpers::{session_for, token};

use client_core::TOKEN_STORAGE_KEY;
use client_core::storage::{FileStorage, KeyValueStorage, MemoryStorage};

use std::sync::Arc;

use tempfile::tempdir;
use wiremock::MockServer;

/// **VALUE**: Verifies a token persisted by one run is restored by the next.
#[tokio::test]
async fn given_persisted_token_when_restoring_then_session_authenticated() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    FileStorage::new(&path).set(TOKEN_STORAGE_KEY, "T1").unwrap();

    let session = session_for(&server, Arc::new(FileStorage::new(&path)));

    assert_eq!(session.token(), Some(token("T1")));
}

/// **VALUE**: Verifies an empty persisted value is not treated as a session.
#[tokio::test]
async fn given_empty_persisted_token_when_restoring_then_signed_out() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "")]));

    let session = session_for(&server, storage);

    assert!(!session.is_authenticated());
}

/// **VALUE**: Verifies unreadable storage starts a signed-out session.
///
/// **BUG THIS CATCHES**: Would catch a corrupt storage file preventing the
/// app from starting at all.
#[tokio::test]
async fn given_corrupt_storage_when_restoring_then_signed_out() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let session = session_for(&server, Arc::new(FileStorage::new(&path)));

    assert!(!session.is_authenticated());
}
