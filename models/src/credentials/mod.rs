//! Login credentials.
//!
//! Held only while a login form is being submitted. Never persisted, never
//! serialized, and the password never shows up in `Debug` output.

pub mod builder;

use std::fmt;

use zeroize::Zeroize;

/// The two inputs of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialField::Username => write!(f, "username"),
            CredentialField::Password => write!(f, "password"),
        }
    }
}

/// Username/password pair ready to be sent to the authentication endpoint.
///
/// Build through [`builder::CredentialsBuilder`] so the form constraints are
/// applied.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub(crate) fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// # Security Note
    /// Only call this when building the authentication request body.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
