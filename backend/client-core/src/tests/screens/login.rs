// Unit tests for the login screen state machine

use crate::error::ClientError;
use crate::screens::login::{LoginScreen, SUBMIT_LABEL, SUBMITTING_LABEL};

use models::CredentialField;

fn filled_screen() -> LoginScreen {
    let mut screen = LoginScreen::new();
    screen.set_username("a@b.co");
    screen.set_password("secret");
    screen
}

/// **VALUE**: Verifies valid fields produce a request tagged with the screen.
///
/// **WHY THIS MATTERS**: The tag lets the host drop outcomes for a screen
/// that has since been replaced.
#[test]
fn given_valid_fields_when_beginning_submit_then_returns_tagged_request() {
    // GIVEN: A filled-in form
    let mut screen = filled_screen();

    // WHEN: Submitting
    let request = screen.begin_submit().expect("valid fields should submit");

    // THEN: The request carries the screen instance and the credentials
    assert_eq!(request.screen, screen.instance());
    assert_eq!(request.credentials.username(), "a@b.co");
    assert_eq!(request.credentials.password(), "secret");
    assert!(screen.is_submitting());
    assert_eq!(screen.submit_label(), SUBMITTING_LABEL);
}

/// **VALUE**: Verifies a second submit is ignored while one is in flight.
///
/// **BUG THIS CATCHES**: Would catch double-clicks sending two token requests.
#[test]
fn given_submission_in_flight_when_submitting_again_then_blocked() {
    let mut screen = filled_screen();
    let _first = screen.begin_submit().unwrap();

    assert!(screen.begin_submit().is_none());
    assert!(screen.is_submitting());
}

/// **VALUE**: Verifies an empty field blocks submission with a hint and focus.
#[test]
fn given_empty_password_when_submitting_then_password_gets_hint_and_focus() {
    // GIVEN: A username but no password, focus on username
    let mut screen = LoginScreen::new();
    screen.set_username("a@b.co");

    // WHEN: Submitting
    let request = screen.begin_submit();

    // THEN: Nothing is sent and the password field is flagged
    assert!(request.is_none());
    assert!(!screen.is_submitting());
    assert_eq!(screen.focus(), CredentialField::Password);
    assert_eq!(
        screen.field_hint(CredentialField::Password),
        Some("Veuillez renseigner ce champ.")
    );
    assert_eq!(screen.field_hint(CredentialField::Username), None);
}

/// **VALUE**: Verifies a malformed email blocks submission.
#[test]
fn given_username_not_an_email_when_submitting_then_username_gets_hint() {
    let mut screen = LoginScreen::new();
    screen.set_username("alice");
    screen.set_password("secret");

    assert!(screen.begin_submit().is_none());
    assert_eq!(screen.focus(), CredentialField::Username);
    assert_eq!(
        screen.field_hint(CredentialField::Username),
        Some("Veuillez saisir une adresse e-mail valide.")
    );
}

/// **VALUE**: Verifies editing the flagged field clears its hint.
#[test]
fn given_hint_shown_when_editing_field_then_hint_cleared() {
    let mut screen = LoginScreen::new();
    screen.set_username("a@b.co");
    assert!(screen.begin_submit().is_none());

    screen.input_char('x');

    assert_eq!(screen.field_hint(CredentialField::Password), None);
}

/// **VALUE**: Verifies a failure message survives until the next real submit.
///
/// **WHY THIS MATTERS**: The user must be able to read why login failed
/// while correcting the fields.
///
/// **BUG THIS CATCHES**: Would catch the error being cleared by a blocked
/// submit or by typing.
#[test]
fn given_failed_login_when_blocked_submit_then_error_persists_until_valid_submit() {
    // GIVEN: A failed submission
    let mut screen = filled_screen();
    let _request = screen.begin_submit().unwrap();
    screen.finish_submit(&Err(ClientError::missing_token()));
    assert_eq!(screen.error(), Some("Token absent de la réponse."));
    assert!(!screen.is_submitting());
    assert_eq!(screen.submit_label(), SUBMIT_LABEL);

    // WHEN: Typing and submitting with an empty password
    screen.set_password("");
    screen.input_char('a');
    screen.backspace();
    assert!(screen.begin_submit().is_none());

    // THEN: The error is still shown
    assert_eq!(screen.error(), Some("Token absent de la réponse."));

    // WHEN: A valid submission starts
    screen.set_password("secret");
    assert!(screen.begin_submit().is_some());

    // THEN: The error is cleared
    assert_eq!(screen.error(), None);
}

/// **VALUE**: Verifies the server's message is what the screen displays.
#[test]
fn given_http_failure_with_message_when_finishing_then_shows_server_message() {
    let mut screen = filled_screen();
    let _request = screen.begin_submit().unwrap();

    screen.finish_submit(&Err(ClientError::from_response(
        401,
        br#"{"message": "Identifiants invalides"}"#,
    )));

    assert_eq!(screen.error(), Some("Identifiants invalides"));
}

/// **VALUE**: Verifies focus cycling and per-field typing.
#[test]
fn given_focus_moved_when_typing_then_characters_go_to_focused_field() {
    let mut screen = LoginScreen::new();
    assert_eq!(screen.focus(), CredentialField::Username);

    screen.input_char('a');
    screen.focus_next();
    screen.input_char('p');
    screen.input_char('w');
    screen.focus_next();
    screen.input_char('b');

    assert_eq!(screen.username(), "ab");
    assert_eq!(screen.masked_password(), "••");
    assert_eq!(screen.focus(), CredentialField::Username);
}

/// **VALUE**: Verifies Debug output never leaks the password.
#[test]
fn given_typed_password_when_debug_formatted_then_password_redacted() {
    let screen = filled_screen();

    let debug = format!("{screen:?}");

    assert!(!debug.contains("secret"));
    assert!(debug.contains("[REDACTED]"));
}
