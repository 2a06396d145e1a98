use crate::error::model_error::ModelError;
use crate::{CredentialField, Credentials, ErrorLocation};

use std::panic::Location;

const REQUIRED_FIELD_MESSAGE: &str = "Veuillez renseigner ce champ.";
const INVALID_EMAIL_MESSAGE: &str = "Veuillez saisir une adresse e-mail valide.";

/// Characters allowed before the `@` of an email field value.
const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Longest allowed domain label.
const MAX_LABEL_LENGTH: usize = 63;

/// Builder applying the login form's native field constraints.
///
/// Both fields are required and the username is an email field. No other
/// validation happens client side.
#[derive(Debug, Default)]
pub struct CredentialsBuilder {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialsBuilder {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Build the credentials, checking fields in form order.
    #[track_caller]
    pub fn build(self) -> Result<Credentials, ModelError> {
        // Email inputs strip surrounding whitespace before validating.
        let username = self.username.unwrap_or_default().trim().to_string();

        if username.is_empty() {
            return Err(ModelError::Validation {
                field: CredentialField::Username,
                message: String::from(REQUIRED_FIELD_MESSAGE),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !is_valid_email(&username) {
            return Err(ModelError::Validation {
                field: CredentialField::Username,
                message: String::from(INVALID_EMAIL_MESSAGE),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password = self.password.unwrap_or_default();

        if password.is_empty() {
            return Err(ModelError::Validation {
                field: CredentialField::Password,
                message: String::from(REQUIRED_FIELD_MESSAGE),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Credentials::new(username, password))
    }
}

/// Email shape check: `local@label(.label)*`.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_part_char) {
        return false;
    }

    !domain.is_empty() && domain.split('.').all(is_valid_domain_label)
}

fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c)
}

fn is_valid_domain_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }

    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }

    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
