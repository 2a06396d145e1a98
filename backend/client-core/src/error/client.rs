//! Failures of the two remote calls.
//!
//! Key design decisions:
//! - The missing-token case is an ordinary value, not a panic or a rethrow
//! - HTTP status and server `message` are stored, never re-parsed from text
//! - `user_message()` is the single place where display text is chosen
//! - All errors include ErrorLocation for debugging

use crate::error::storage::StorageError;

use common::{ErrorLocation, HttpStatusCode};
use models::ErrorBody;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Text shown when a login response carries no token.
pub const MISSING_TOKEN_MESSAGE: &str = "Token absent de la réponse.";

#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error("Authentication Error: {message} {location}")]
    Authentication {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        status: Option<HttpStatusCode>,
        server_message: Option<String>,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    #[track_caller]
    pub fn missing_token() -> Self {
        ClientError::Authentication {
            message: String::from(MISSING_TOKEN_MESSAGE),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build from a non-2xx response, keeping any server-supplied message.
    #[track_caller]
    pub fn from_response(status_code: u16, body: &[u8]) -> Self {
        let status = HttpStatusCode(status_code);
        ClientError::Transport {
            message: status.failure_message(),
            status: Some(status),
            server_message: ErrorBody::from_bytes(body).into_message(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text to show on screen: the server's `message` when it sent one,
    /// the failure's generic description otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport {
                server_message: Some(server_message),
                ..
            } => server_message.clone(),
            ClientError::Authentication { message, .. }
            | ClientError::Transport { message, .. }
            | ClientError::Decode { message, .. }
            | ClientError::UrlParse { message, .. } => message.clone(),
            ClientError::Storage(error) => error.user_message(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ClientError::Authentication { .. })
    }

    /// HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Transport {
                status: Some(status),
                ..
            } => Some(status.0),
            _ => None,
        }
    }

    /// Error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ClientError::Authentication { .. } => "authentication",
            ClientError::Transport {
                status: Some(status),
                ..
            } if status.is_client_error() => "client_error",
            ClientError::Transport {
                status: Some(status),
                ..
            } if status.is_server_error() => "server_error",
            ClientError::Transport { .. } => "transport",
            ClientError::Decode { .. } => "decode",
            ClientError::UrlParse { .. } => "url_parse",
            ClientError::Storage(_) => "storage",
        }
    }
}

impl From<url::ParseError> for ClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|s| HttpStatusCode(s.as_u16()));
        ClientError::Transport {
            message: error.to_string(),
            status,
            server_message: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
