//! Login screen state.
//!
//! {Idle} → submit → {Submitting} → success → {Idle, authenticated}
//!                                → failure → {Idle, error shown}
//!
//! The error line survives until the next submission attempt that passes
//! the field constraints.

use crate::error::ClientError;

use models::{CredentialField, Credentials, CredentialsBuilder};

use std::fmt;

use log::{debug, info};
use uuid::Uuid;

pub const TITLE: &str = "Connexion";
pub const USERNAME_LABEL: &str = "Email";
pub const PASSWORD_LABEL: &str = "Mot de passe";
pub const SUBMIT_LABEL: &str = "Se connecter";
pub const SUBMITTING_LABEL: &str = "Connexion…";

/// Credentials on their way to the session store, tagged with the screen
/// that sent them.
#[derive(Debug)]
pub struct LoginRequest {
    pub screen: Uuid,
    pub credentials: Credentials,
}

pub struct LoginScreen {
    instance: Uuid,
    username: String,
    password: String,
    focus: CredentialField,
    error: Option<String>,
    field_hint: Option<(CredentialField, String)>,
    submitting: bool,
}

impl fmt::Debug for LoginScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginScreen")
            .field("instance", &self.instance)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("focus", &self.focus)
            .field("error", &self.error)
            .field("submitting", &self.submitting)
            .finish()
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            instance: Uuid::new_v4(),
            username: String::new(),
            password: String::new(),
            focus: CredentialField::Username,
            error: None,
            field_hint: None,
            submitting: false,
        }
    }

    pub fn instance(&self) -> Uuid {
        self.instance
    }

    // ------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.clear_hint_for(CredentialField::Username);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.clear_hint_for(CredentialField::Password);
    }

    /// Append a character to the focused field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            CredentialField::Username => self.username.push(c),
            CredentialField::Password => self.password.push(c),
        }
        self.clear_hint_for(self.focus);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        match self.focus {
            CredentialField::Username => self.username.pop(),
            CredentialField::Password => self.password.pop(),
        };
        self.clear_hint_for(self.focus);
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CredentialField::Username => CredentialField::Password,
            CredentialField::Password => CredentialField::Username,
        };
    }

    pub fn focus(&self) -> CredentialField {
        self.focus
    }

    fn clear_hint_for(&mut self, field: CredentialField) {
        if matches!(&self.field_hint, Some((hinted, _)) if *hinted == field) {
            self.field_hint = None;
        }
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Start a submission.
    ///
    /// Returns `None` without touching the error line when a submission is
    /// already running or a field constraint fails; the failing field gets
    /// focus and a hint instead.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.submitting {
            debug!("Submit ignored: already submitting");
            return None;
        }

        let credentials = match CredentialsBuilder::default()
            .with_username(self.username.clone())
            .with_password(self.password.clone())
            .build()
        {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!("Submit blocked by field constraint: {}", e);
                self.focus = e.field();
                self.field_hint = Some((e.field(), e.message().to_string()));
                return None;
            }
        };

        self.error = None;
        self.field_hint = None;
        self.submitting = true;

        Some(LoginRequest {
            screen: self.instance,
            credentials,
        })
    }

    /// Record the outcome of a submission started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, result: &Result<(), ClientError>) {
        if let Err(e) = result {
            info!("Login failed ({}): {}", e.error_category(), e);
            self.error = Some(e.user_message());
        }
        self.submitting = false;
    }

    // ------------------------------------------------------------------
    // Render data
    // ------------------------------------------------------------------

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password as displayed: one bullet per character.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Constraint hint for `field`, if the last submit was held back by it.
    pub fn field_hint(&self, field: CredentialField) -> Option<&str> {
        match &self.field_hint {
            Some((hinted, message)) if *hinted == field => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}
