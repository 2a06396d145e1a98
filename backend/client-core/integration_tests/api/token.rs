use crate::helpers::{AUTH_PATH, TEST_PASSWORD, TEST_USERNAME, api_for, credentials, mount_auth};

use client_core::api::ApiClient;
use client_core::config::AppConfig;
use client_core::error::ClientError;

use std::net::TcpListener;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies credentials are sent as a form and the token is returned.
///
/// **WHY THIS MATTERS**: The authentication endpoint only accepts
/// form-urlencoded `username`/`password` fields.
///
/// **BUG THIS CATCHES**: Would catch a switch to a JSON body or renamed fields.
#[tokio::test]
async fn given_valid_credentials_when_requesting_token_then_posts_form_and_returns_token() {
    // GIVEN: An endpoint that only answers a correctly shaped form
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=a%40b.com"))
        .and(body_string_contains(format!("password={TEST_PASSWORD}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "T1" })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Requesting a token
    let token = api_for(&server)
        .request_token(&credentials())
        .await
        .expect("Token request should succeed");

    // THEN: The raw token is returned
    assert_eq!(token.as_str(), "T1");
    assert_eq!(credentials().username(), TEST_USERNAME);
}

/// **VALUE**: Verifies every body without a usable token is a missing-token
/// failure.
///
/// **BUG THIS CATCHES**: Would catch an empty token being accepted, or a
/// non-JSON body surfacing as a decode error on the login screen.
#[tokio::test]
async fn given_body_without_token_when_requesting_token_then_missing_token_error() {
    let bodies = [
        ResponseTemplate::new(200).set_body_json(json!({})),
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": "" })),
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": 42 })),
        ResponseTemplate::new(200).set_body_json(json!(["T1"])),
        ResponseTemplate::new(200).set_body_string("not json"),
    ];

    for body in bodies {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(AUTH_PATH))
            .respond_with(body)
            .mount(&server)
            .await;

        let result = api_for(&server).request_token(&credentials()).await;

        let error = result.expect_err("Response without token should fail");
        assert!(error.is_authentication(), "Unexpected error: {error}");
        assert_eq!(error.user_message(), "Token absent de la réponse.");
    }
}

/// **VALUE**: Verifies a rejected login surfaces the server's message.
#[tokio::test]
async fn given_rejected_login_when_requesting_token_then_transport_error_with_message() {
    let server = MockServer::start().await;
    mount_auth(&server, 401, json!({ "message": "Identifiants invalides" })).await;

    let error = api_for(&server)
        .request_token(&credentials())
        .await
        .expect_err("401 should fail");

    assert!(matches!(error, ClientError::Transport { .. }));
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.user_message(), "Identifiants invalides");
}

/// **VALUE**: Verifies a network failure is a transport error with text.
///
/// **BUG THIS CATCHES**: Would catch a refused connection showing nothing.
#[tokio::test]
async fn given_unreachable_server_when_requesting_token_then_transport_error() {
    // GIVEN: An endpoint on a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let port = listener.local_addr().expect("Probe port has no address").port();
    drop(listener);

    let mut config = AppConfig::default();
    config.endpoints.auth_url = format!("http://127.0.0.1:{port}{AUTH_PATH}");
    let api = ApiClient::new(&config).expect("Failed to build API client");

    // WHEN: Requesting a token
    let error = api
        .request_token(&credentials())
        .await
        .expect_err("Unreachable server should fail");

    // THEN: The failure is a transport error with no status
    assert!(matches!(error, ClientError::Transport { .. }));
    assert_eq!(error.status_code(), None);
    assert!(!error.user_message().is_empty());
}
