//! Lenient schemas for the authentication response and error bodies.
//!
//! The remote service is only loosely specified here: a token grant is any
//! JSON object, and only a non-empty string `access_token` counts as a token.
//! Error bodies likewise only contribute a non-empty string `message`.

use common::BearerToken;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of a successful authentication response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenGrant {
    #[serde(default, deserialize_with = "non_empty_string")]
    access_token: Option<String>,
}

impl TokenGrant {
    /// Interpret any JSON value as a grant. Non-objects carry no token.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Consume the grant, yielding the bearer token if one was issued.
    pub fn into_token(self) -> Option<BearerToken> {
        self.access_token.and_then(BearerToken::from_non_empty)
    }
}

/// Optional JSON body attached to a failed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "non_empty_string")]
    message: Option<String>,
}

impl ErrorBody {
    /// Parse a raw response body; anything unrecognized yields no message.
    pub fn from_bytes(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) if value.is_object() => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_message(self) -> Option<String> {
        self.message
    }
}

/// Accept only non-empty strings; every other JSON value becomes `None`.
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
