//! Data exchanged between docviewer and the remote document service.
//!
//! Models have no I/O. Decoding is strict where the screens rely on a
//! field (document filename/url) and lenient where the remote service is
//! known to vary (token grants, error bodies).

pub mod credentials;
pub mod document;
pub mod error;
pub mod token_grant;

pub use common::ErrorLocation;
pub use credentials::builder::CredentialsBuilder;
pub use credentials::{CredentialField, Credentials};
pub use document::{Document, DocumentList};
pub use error::model_error::ModelError;
pub use token_grant::{ErrorBody, TokenGrant};

#[cfg(test)]
mod tests;
