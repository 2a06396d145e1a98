//! Core of the docviewer client: configuration, durable storage, the HTTP
//! client for the two remote endpoints, the session store and the screen
//! state machines.
//!
//! Nothing in this crate touches the terminal. The host application renders
//! the screens and feeds key presses and network outcomes back into them.

pub mod api;
pub mod config;
pub mod error;
mod fs;
pub mod paths;
pub mod screens;
pub mod session;
pub mod storage;

#[cfg(test)]
mod tests;

pub const APP_NAME: &str = "docviewer";
pub const REMOTE_HOST: &str = "https://vps-71a1beaa.vps.ovh.net:8443";
pub const PROJECT_ID: &str = "aedd2576-7895-47a7-95e2-9e631b837454";
pub const DEFAULT_AUTH_URL: &str =
    const_format::concatcp!(REMOTE_HOST, "/authentification/get-token");
pub const DEFAULT_DOCUMENTS_URL: &str = const_format::concatcp!(
    REMOTE_HOST,
    "/documents/download/?project_id=",
    PROJECT_ID
);

/// Durable storage key holding the raw bearer token.
pub const TOKEN_STORAGE_KEY: &str = "jwt";
