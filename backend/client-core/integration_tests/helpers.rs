//! Test helpers for client-core integration tests.
//!
//! This module provides utilities for:
//! - Pointing an `AppConfig` at a wiremock server
//! - Mounting the two remote endpoints
//! - Building a session store over in-memory or file storage

use client_core::api::ApiClient;
use client_core::config::AppConfig;
use client_core::error::StorageError;
use client_core::session::SessionStore;
use client_core::storage::KeyValueStorage;
use client_core::{PROJECT_ID, TOKEN_STORAGE_KEY};

use common::{BearerToken, ErrorLocation};
use models::{Credentials, CredentialsBuilder};

use std::io;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTH_PATH: &str = "/authentification/get-token";
pub const DOCUMENTS_PATH: &str = "/documents/download/";

pub const TEST_USERNAME: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "x";

/// Config whose endpoints point at `server`.
pub fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.endpoints.auth_url = format!("{}{}", server.uri(), AUTH_PATH);
    config.endpoints.documents_url =
        format!("{}{}?project_id={}", server.uri(), DOCUMENTS_PATH, PROJECT_ID);
    config
}

pub fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(server)).expect("Failed to build API client")
}

pub fn session_for(server: &MockServer, storage: Arc<dyn KeyValueStorage>) -> SessionStore {
    SessionStore::restore(api_for(server), storage)
}

pub fn credentials() -> Credentials {
    CredentialsBuilder::default()
        .with_username(TEST_USERNAME)
        .with_password(TEST_PASSWORD)
        .build()
        .expect("Test credentials should be valid")
}

pub fn token(raw: &str) -> BearerToken {
    BearerToken::from_non_empty(raw.to_string()).expect("Test token should be non-empty")
}

pub fn stored_token(storage: &dyn KeyValueStorage) -> Option<String> {
    storage
        .get(TOKEN_STORAGE_KEY)
        .expect("Failed to read test storage")
}

/// Mount the authentication endpoint answering `status` with `body`.
pub async fn mount_auth(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the listing endpoint answering `status` with `body`.
pub async fn mount_documents(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(query_param("project_id", PROJECT_ID))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Storage whose writes always fail; reads see nothing.
#[derive(Debug, Default)]
pub struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    #[track_caller]
    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: PathBuf::from("read-only"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only storage"),
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
