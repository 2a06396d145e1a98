use crate::helpers::{DOCUMENTS_PATH, api_for, mount_documents, token};

use client_core::PROJECT_ID;
use client_core::error::ClientError;

use models::Document;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the listing request carries the bearer header and
/// project id, and the body decodes into documents.
///
/// **BUG THIS CATCHES**: Would catch a missing `Bearer ` prefix or a
/// dropped query string.
#[tokio::test]
async fn given_token_when_listing_documents_then_sends_bearer_and_decodes_list() {
    // GIVEN: An endpoint that requires the bearer header
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(query_param("project_id", PROJECT_ID))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "filename": "a.pdf", "url": "http://x/a.pdf", "size": 12 },
                { "filename": "b.pdf", "url": "http://x/b.pdf" }
            ],
            "project": "ignored"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing documents
    let list = api_for(&server)
        .list_documents(&token("T1"))
        .await
        .expect("Listing should succeed");

    // THEN: Both entries are decoded, extra fields ignored
    assert_eq!(
        list.documents,
        vec![
            Document::new("a.pdf", "http://x/a.pdf"),
            Document::new("b.pdf", "http://x/b.pdf"),
        ]
    );
}

/// **VALUE**: Verifies an entry missing `url` is a decode error.
#[tokio::test]
async fn given_entry_without_url_when_listing_documents_then_decode_error() {
    let server = MockServer::start().await;
    mount_documents(&server, 200, json!({ "documents": [{ "filename": "a.pdf" }] })).await;

    let error = api_for(&server)
        .list_documents(&token("T1"))
        .await
        .expect_err("Malformed entry should fail");

    assert!(matches!(error, ClientError::Decode { .. }));
}

/// **VALUE**: Verifies a non-JSON success body is a decode error.
#[tokio::test]
async fn given_non_json_body_when_listing_documents_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let error = api_for(&server)
        .list_documents(&token("T1"))
        .await
        .expect_err("Non-JSON body should fail");

    assert_eq!(error.error_category(), "decode");
}

/// **VALUE**: Verifies an error status without a message uses generic text.
#[tokio::test]
async fn given_server_error_without_message_when_listing_then_generic_message() {
    let server = MockServer::start().await;
    mount_documents(&server, 500, json!({ "detail": "boom" })).await;

    let error = api_for(&server)
        .list_documents(&token("T1"))
        .await
        .expect_err("500 should fail");

    assert_eq!(error.user_message(), "Request failed with status code 500");
    assert_eq!(error.status_code(), Some(500));
}
