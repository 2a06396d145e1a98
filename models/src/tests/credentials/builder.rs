use crate::{CredentialField, CredentialsBuilder, ModelError};

/// **VALUE**: Verifies the happy path used by every login.
///
/// **BUG THIS CATCHES**: Would catch valid email/password pairs being rejected.
#[test]
fn given_email_and_password_when_building_then_returns_credentials() {
    // GIVEN: A well-formed email and a password
    let builder = CredentialsBuilder::default()
        .with_username("a@b.com")
        .with_password("x");

    // WHEN: Building
    let credentials = builder.build().unwrap();

    // THEN: Values are kept as entered
    assert_eq!(credentials.username(), "a@b.com");
    assert_eq!(credentials.password(), "x");
}

/// **VALUE**: Verifies the required-field gate on the username.
///
/// **WHY THIS MATTERS**: An empty form must never reach the authentication
/// endpoint.
///
/// **BUG THIS CATCHES**: Would catch the required check being skipped.
#[test]
fn given_missing_username_when_building_then_returns_username_validation_error() {
    // GIVEN: Builder without username
    let builder = CredentialsBuilder::default().with_password("x");

    // WHEN: Building
    let result = builder.build();

    // THEN: Username is reported as required
    match result.unwrap_err() {
        ModelError::Validation { field, message, .. } => {
            assert_eq!(field, CredentialField::Username);
            assert_eq!(message, "Veuillez renseigner ce champ.");
        }
    }
}

/// **VALUE**: Verifies the required-field gate on the password.
///
/// **BUG THIS CATCHES**: Would catch an empty password being submitted.
#[test]
fn given_empty_password_when_building_then_returns_password_validation_error() {
    let result = CredentialsBuilder::default()
        .with_username("a@b.com")
        .with_password("")
        .build();

    let err = result.unwrap_err();
    assert_eq!(err.field(), CredentialField::Password);
    assert_eq!(err.message(), "Veuillez renseigner ce champ.");
}

/// **VALUE**: Verifies the email-field constraint on the username.
///
/// **WHY THIS MATTERS**: The login form's username input is an email input;
/// values that are not email-shaped are held back like a browser would.
///
/// **BUG THIS CATCHES**: Would catch the shape check accepting obvious
/// non-emails or rejecting ordinary addresses.
#[test]
fn given_various_usernames_when_building_then_email_shape_is_enforced() {
    let rejected = ["alice", "@b.com", "a@", "a@-b.com", "a@b..com", "a b@c.com"];
    for username in rejected {
        let result = CredentialsBuilder::default()
            .with_username(username)
            .with_password("x")
            .build();
        let err = result.expect_err(username);
        assert_eq!(err.field(), CredentialField::Username, "{username}");
        assert_eq!(err.message(), "Veuillez saisir une adresse e-mail valide.");
    }

    let accepted = ["a@b", "first.last+tag@sub.example.org", "x_y@host-name.io"];
    for username in accepted {
        let result = CredentialsBuilder::default()
            .with_username(username)
            .with_password("x")
            .build();
        assert!(result.is_ok(), "{username} should be accepted");
    }
}

/// **VALUE**: Verifies surrounding whitespace is stripped from the email.
///
/// **BUG THIS CATCHES**: Would catch " a@b.com " being rejected or sent with spaces.
#[test]
fn given_padded_email_when_building_then_whitespace_is_trimmed() {
    let credentials = CredentialsBuilder::default()
        .with_username("  a@b.com ")
        .with_password(" keep spaces ")
        .build()
        .unwrap();

    assert_eq!(credentials.username(), "a@b.com");
    assert_eq!(credentials.password(), " keep spaces ", "Password is taken verbatim");
}

/// **VALUE**: Verifies the password never shows in Debug output.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug leaking the password to logs.
#[test]
fn given_credentials_when_debug_formatted_then_password_is_redacted() {
    let credentials = CredentialsBuilder::default()
        .with_username("a@b.com")
        .with_password("hunter2")
        .build()
        .unwrap();

    let debug = format!("{credentials:?}");

    assert!(debug.contains("a@b.com"));
    assert!(!debug.contains("hunter2"));
}
