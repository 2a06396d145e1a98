//! Effects returned by the reducer for the runtime to execute.
//!
//! The reducer only mutates state and returns effects. Network calls,
//! session writes and browser launches happen in [`crate::runtime`].

use client_core::screens::{FetchRequest, LoginRequest};

#[derive(Debug)]
pub enum UiEffect {
    /// Exchange credentials for a token.
    Login(LoginRequest),

    /// Load the document list for a token.
    Fetch(FetchRequest),

    /// End the session.
    Logout,

    /// Open a document link in the system browser.
    OpenUrl { url: String },

    /// Quit the application.
    Quit,
}
