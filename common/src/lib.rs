//! Shared primitives for docviewer.
//!
//! This crate holds the small building blocks every other crate leans on:
//! error locations, HTTP status helpers and the redacted bearer token.
//!
//! ## Architecture
//!
//! - **common** (this crate): Primitives with no I/O
//! - **models**: Pure data structures exchanged with the remote service
//! - **client-core**: Session store, HTTP client, screens
//! - **docviewer**: Terminal host wiring everything together

pub mod bearer_token;
pub mod error;
pub mod http_status;

pub use bearer_token::BearerToken;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
