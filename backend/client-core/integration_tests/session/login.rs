use crate::helpers::{
    ReadOnlyStorage, credentials, mount_auth, session_for, stored_token, token,
};

use client_core::TOKEN_STORAGE_KEY;
use client_core::error::ClientError;
use client_core::storage::{FileStorage, KeyValueStorage, MemoryStorage};

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;
use wiremock::MockServer;

/// **VALUE**: Verifies a successful login updates memory, storage and
/// subscribers with the same token.
///
/// **WHY THIS MATTERS**: The shell routes on the subscription and the next
/// start restores from storage; both must agree with the in-memory token.
///
/// **BUG THIS CATCHES**: Would catch login forgetting to persist, or
/// persisting something other than the raw token.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_token_in_memory_and_storage() {
    // GIVEN: An auth endpoint issuing T1 and an empty session
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({ "access_token": "T1" })).await;
    let storage = Arc::new(MemoryStorage::new());
    let session = session_for(&server, storage.clone());
    let mut changes = session.subscribe();

    // WHEN: Logging in
    session.login(&credentials()).await.expect("Login should succeed");

    // THEN: All three views of the session hold T1
    assert_eq!(session.token(), Some(token("T1")));
    assert!(session.is_authenticated());
    assert_eq!(stored_token(storage.as_ref()).as_deref(), Some("T1"));
    assert!(changes.has_changed().expect("Session store dropped"));
    assert_eq!(*changes.borrow_and_update(), Some(token("T1")));
}

/// **VALUE**: Verifies a second login replaces the first token everywhere.
#[tokio::test]
async fn given_existing_session_when_logging_in_again_then_token_replaced() {
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({ "access_token": "T2" })).await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]));
    let session = session_for(&server, storage.clone());
    assert_eq!(session.token(), Some(token("T1")));

    session.login(&credentials()).await.expect("Login should succeed");

    assert_eq!(session.token(), Some(token("T2")));
    assert_eq!(stored_token(storage.as_ref()).as_deref(), Some("T2"));
}

/// **VALUE**: Verifies a response without a token leaves the session as it was.
///
/// **BUG THIS CATCHES**: Would catch a failed login clearing an existing
/// session or writing an empty token.
#[tokio::test]
async fn given_response_without_token_when_logging_in_then_session_unchanged() {
    // GIVEN: An existing session and an endpoint answering {}
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({})).await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T0")]));
    let session = session_for(&server, storage.clone());
    let changes = session.subscribe();

    // WHEN: Logging in
    let result = session.login(&credentials()).await;

    // THEN: Authentication error, nothing changed
    let error = result.expect_err("Missing token should fail");
    assert!(error.is_authentication());
    assert_eq!(session.token(), Some(token("T0")));
    assert_eq!(stored_token(storage.as_ref()).as_deref(), Some("T0"));
    assert!(!changes.has_changed().expect("Session store dropped"));
}

/// **VALUE**: Verifies an HTTP failure propagates unchanged.
#[tokio::test]
async fn given_rejected_credentials_when_logging_in_then_transport_error_propagated() {
    let server = MockServer::start().await;
    mount_auth(&server, 403, json!({ "message": "Compte bloqué" })).await;
    let storage = Arc::new(MemoryStorage::new());
    let session = session_for(&server, storage.clone());

    let error = session
        .login(&credentials())
        .await
        .expect_err("403 should fail");

    assert!(matches!(error, ClientError::Transport { .. }));
    assert_eq!(error.user_message(), "Compte bloqué");
    assert!(!session.is_authenticated());
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies a token that cannot be persisted is not kept in memory.
///
/// **WHY THIS MATTERS**: A token visible in memory must always be
/// retrievable from storage.
#[tokio::test]
async fn given_storage_rejects_write_when_logging_in_then_storage_error_and_signed_out() {
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({ "access_token": "T1" })).await;
    let session = session_for(&server, Arc::new(ReadOnlyStorage));

    let error = session
        .login(&credentials())
        .await
        .expect_err("Storage failure should fail login");

    assert!(matches!(error, ClientError::Storage(_)));
    assert_eq!(error.error_category(), "storage");
    assert!(!session.is_authenticated());
}

/// **VALUE**: Verifies login recovers from a corrupted storage file.
///
/// **WHY THIS MATTERS**: The session starts signed out when the file cannot be
/// read. The next successful login must be able to persist its token.
///
/// **BUG THIS CATCHES**: Would catch every login failing with a Storage error
/// until the file is deleted by hand.
#[tokio::test]
async fn given_corrupted_storage_file_when_logging_in_then_token_is_persisted() {
    // GIVEN: A truncated storage file and an auth endpoint issuing T1
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({ "access_token": "T1" })).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ truncated").unwrap();
    let storage = Arc::new(FileStorage::new(&path));
    let session = session_for(&server, storage.clone());
    assert!(!session.is_authenticated());

    // WHEN: Logging in
    session.login(&credentials()).await.expect("Login should succeed");

    // THEN: The token is in memory and in the rewritten file
    assert_eq!(session.token(), Some(token("T1")));
    assert_eq!(stored_token(storage.as_ref()).as_deref(), Some("T1"));
}
