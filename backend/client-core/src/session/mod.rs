//! Session store: the single owner of authentication state.
//!
//! # Architecture
//!
//! - One `SessionStore` is built at startup and shared by `Arc`
//! - The token lives in a `watch` channel: readers take snapshots or
//!   subscribe to changes, only `login`/`logout` write
//! - The persisted copy is written before the in-memory one, so a token
//!   visible in memory is always retrievable from durable storage

use crate::TOKEN_STORAGE_KEY;
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::storage::KeyValueStorage;

use common::BearerToken;
use models::Credentials;

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;

pub type TokenReceiver = watch::Receiver<Option<BearerToken>>;

pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn KeyValueStorage>,
    token: watch::Sender<Option<BearerToken>>,
}

impl SessionStore {
    /// Build the store, restoring a previously persisted token if any.
    ///
    /// The restored token is trusted as-is; a stale token only shows up
    /// when a request made with it fails. Unreadable storage starts an
    /// unauthenticated session.
    pub fn restore(api: ApiClient, storage: Arc<dyn KeyValueStorage>) -> Self {
        let restored = match storage.get(TOKEN_STORAGE_KEY) {
            Ok(Some(raw)) => BearerToken::from_non_empty(raw),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read persisted token, starting signed out: {}", e);
                None
            }
        };

        match &restored {
            Some(token) => info!("Restored persisted session ({} chars)", token.len()),
            None => info!("No persisted session"),
        }

        let (token, _) = watch::channel(restored);

        Self {
            api,
            storage,
            token,
        }
    }

    /// Exchange credentials for a token and make it the current session.
    ///
    /// On any failure the session is left exactly as it was.
    ///
    /// # Errors
    /// - [`ClientError::Authentication`] if the response carried no token
    /// - [`ClientError::Transport`] for network or HTTP failures, unchanged
    /// - [`ClientError::Storage`] if the token could not be persisted
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let token = self.api.request_token(credentials).await?;

        self.storage.set(TOKEN_STORAGE_KEY, token.as_str())?;

        info!("Login succeeded for {}", credentials.username());
        let previous = self.token.send_replace(Some(token));
        if previous.is_some() {
            info!("Replaced existing session token");
        }

        Ok(())
    }

    /// Clear the session and its persisted copy. Never fails.
    pub fn logout(&self) {
        let previous = self.token.send_replace(None);
        if previous.is_none() {
            warn!("Logout requested but no session was active");
        }

        if let Err(e) = self.storage.remove(TOKEN_STORAGE_KEY) {
            warn!("Failed to remove persisted token: {}", e);
        }

        info!("Logged out");
    }

    /// Snapshot of the current token.
    pub fn token(&self) -> Option<BearerToken> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Receiver notified on every login/logout.
    pub fn subscribe(&self) -> TokenReceiver {
        self.token.subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
