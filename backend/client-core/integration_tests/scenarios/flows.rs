//! End-to-end flows through the shell, screens and session store against
//! mocked endpoints.

use crate::helpers::{
    DOCUMENTS_PATH, TEST_PASSWORD, TEST_USERNAME, mount_auth, mount_documents, session_for,
    stored_token, token,
};

use client_core::TOKEN_STORAGE_KEY;
use client_core::error::ClientError;
use client_core::screens::{DocumentsView, FetchRequest, Route, Shell};
use client_core::session::SessionStore;
use client_core::storage::MemoryStorage;

use models::Document;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Submit the login form the way the terminal runtime does: take the request,
/// run it against the session, then hand the outcome back to the screen.
async fn submit_login(shell: &mut Shell, session: &SessionStore) -> Result<(), ClientError> {
    let login = shell.login_mut().expect("Should be on login");
    let request = login.begin_submit().expect("Submission should not be blocked");
    assert!(login.is_submitting());

    let result = session.login(&request.credentials).await;
    login.finish_submit(&result);
    result
}

/// Run the pending fetch, if any, and hand its outcome to the shell.
async fn run_fetch(shell: &mut Shell, session: &SessionStore, fetch: Option<FetchRequest>) {
    if let Some(fetch) = fetch {
        let result = fetch.execute(session.api()).await;
        assert!(shell.apply_fetch(&fetch.generation, result));
    }
}

/// **VALUE**: Verifies the login flow lands on the document screen.
///
/// **WHY THIS MATTERS**: This is the main path through the application.
#[tokio::test]
async fn given_valid_login_when_submitting_then_token_stored_and_documents_shown() {
    // GIVEN: Endpoints issuing T1 and an empty listing
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({ "access_token": "T1" })).await;
    mount_documents(&server, 200, json!({ "documents": [] })).await;
    let storage = Arc::new(MemoryStorage::new());
    let session = session_for(&server, storage.clone());
    let (mut shell, fetch) = Shell::start(session.token().as_ref());
    assert!(fetch.is_none());

    // WHEN: Submitting the login form
    let login = shell.login_mut().expect("Should start on login");
    login.set_username(TEST_USERNAME);
    login.set_password(TEST_PASSWORD);
    let outcome = submit_login(&mut shell, &session).await;

    // THEN: The session holds T1 and the shell moves to documents
    assert!(outcome.is_ok());
    assert_eq!(session.token(), Some(token("T1")));
    assert_eq!(stored_token(storage.as_ref()).as_deref(), Some("T1"));

    let fetch = shell.sync(session.token().as_ref());
    assert_eq!(shell.route(), Route::Documents);
    assert!(fetch.is_some());
}

/// **VALUE**: Verifies a login response without a token keeps the login
/// screen with the fixed message.
#[tokio::test]
async fn given_response_without_token_when_submitting_then_login_shows_message() {
    let server = MockServer::start().await;
    mount_auth(&server, 200, json!({})).await;
    let session = session_for(&server, Arc::new(MemoryStorage::new()));
    let (mut shell, _) = Shell::start(None);

    let login = shell.login_mut().expect("Should start on login");
    login.set_username(TEST_USERNAME);
    login.set_password(TEST_PASSWORD);
    let outcome = submit_login(&mut shell, &session).await;

    assert!(matches!(outcome, Err(ClientError::Authentication { .. })));
    let login = shell.login_mut().expect("Should stay on login");
    assert_eq!(login.error(), Some("Token absent de la réponse."));
    assert!(!login.is_submitting());

    assert!(shell.sync(session.token().as_ref()).is_none());
    assert_eq!(shell.route(), Route::Login);
}

/// **VALUE**: Verifies a listing with one entry renders as one row.
#[tokio::test]
async fn given_listing_with_one_document_when_fetched_then_one_row_shown() {
    // GIVEN: A session holding T1
    let server = MockServer::start().await;
    mount_documents(
        &server,
        200,
        json!({ "documents": [{ "filename": "a.pdf", "url": "http://x/a.pdf" }] }),
    )
    .await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]));
    let session = session_for(&server, storage);

    // WHEN: The shell starts and its fetch completes
    let (mut shell, fetch) = Shell::start(session.token().as_ref());
    run_fetch(&mut shell, &session, fetch).await;

    // THEN: Exactly one row
    let documents = shell.documents_mut().expect("Should be on documents");
    assert_eq!(
        documents.view(),
        DocumentsView::Loaded(&[Document::new("a.pdf", "http://x/a.pdf")])
    );
    assert_eq!(
        documents.selected_document().map(|d| d.url.as_str()),
        Some("http://x/a.pdf")
    );
}

/// **VALUE**: Verifies a rejected fetch shows only the server's message.
#[tokio::test]
async fn given_rejected_fetch_when_fetched_then_only_message_shown() {
    let server = MockServer::start().await;
    mount_documents(&server, 401, json!({ "message": "expired" })).await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]));
    let session = session_for(&server, storage);

    let (mut shell, fetch) = Shell::start(session.token().as_ref());
    run_fetch(&mut shell, &session, fetch).await;

    let documents = shell.documents_mut().expect("Should be on documents");
    assert_eq!(documents.view(), DocumentsView::Error("expired"));
    assert!(documents.selected_document().is_none());
}

/// **VALUE**: Verifies a persisted token skips the login screen and is the
/// one sent with the fetch.
///
/// **BUG THIS CATCHES**: Would catch the first fetch going out without the
/// restored token.
#[tokio::test]
async fn given_persisted_token_when_starting_then_documents_fetched_with_it() {
    // GIVEN: A persisted T1 and an endpoint that only answers Bearer T1
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]));
    let session = session_for(&server, storage);

    // WHEN: Starting and running the initial fetch
    let (mut shell, fetch) = Shell::start(session.token().as_ref());
    assert_eq!(shell.route(), Route::Documents);
    run_fetch(&mut shell, &session, fetch).await;

    // THEN: The listing loaded; syncing the same token does not refetch
    assert!(shell.sync(session.token().as_ref()).is_none());
    let documents = shell.documents_mut().expect("Should be on documents");
    assert_eq!(documents.view(), DocumentsView::Loaded(&[]));
    assert_eq!(documents.fetches_issued(), 1);
}

/// **VALUE**: Verifies logout clears storage and returns to login.
#[tokio::test]
async fn given_documents_shown_when_logging_out_then_storage_cleared_and_login_shown() {
    let server = MockServer::start().await;
    mount_documents(&server, 200, json!({ "documents": [] })).await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_STORAGE_KEY, "T1")]));
    let session = session_for(&server, storage.clone());
    let (mut shell, fetch) = Shell::start(session.token().as_ref());
    run_fetch(&mut shell, &session, fetch).await;

    shell
        .documents_mut()
        .expect("Should be on documents")
        .logout(&session);
    let fetch = shell.sync(session.token().as_ref());

    assert!(fetch.is_none());
    assert_eq!(shell.route(), Route::Login);
    assert_eq!(stored_token(storage.as_ref()), None);
}
