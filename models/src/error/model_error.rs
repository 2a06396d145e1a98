use crate::{CredentialField, ErrorLocation};

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {field}: {message} {location}")]
    Validation {
        field: CredentialField,
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// The message without location, suitable for a field hint.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } => message,
        }
    }

    pub fn field(&self) -> CredentialField {
        match self {
            ModelError::Validation { field, .. } => *field,
        }
    }
}
