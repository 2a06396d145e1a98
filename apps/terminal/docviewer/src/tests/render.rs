// Render checks against an in-memory terminal

use super::{signed_out, token};

use crate::render::render;
use crate::state::AppState;

use client_core::error::ClientError;

use models::{Document, DocumentList};

use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn rendered_text(state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| render(state, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// **VALUE**: Verifies the login form shows its labels and masks the password.
///
/// **BUG THIS CATCHES**: Would catch the password being drawn in clear text.
#[test]
fn given_login_form_when_rendered_then_labels_shown_and_password_masked() {
    // GIVEN: A filled-in login form
    let mut state = signed_out();
    let login = state.shell.login_mut().unwrap();
    login.set_username("a@b.com");
    login.set_password("hunter2");

    // WHEN: Rendering
    let text = rendered_text(&state);

    // THEN: Labels and masked password are shown
    assert!(text.contains("Connexion"));
    assert!(text.contains("Email"));
    assert!(text.contains("Mot de passe"));
    assert!(text.contains("a@b.com"));
    assert!(text.contains("•••••••"));
    assert!(!text.contains("hunter2"));
    assert!(text.contains("[ Se connecter ]"));
}

/// **VALUE**: Verifies the submitting label and the error line are drawn.
#[test]
fn given_failed_login_when_rendered_then_error_line_shown() {
    let mut state = signed_out();
    let login = state.shell.login_mut().unwrap();
    login.set_username("a@b.com");
    login.set_password("x");
    let _request = login.begin_submit().unwrap();
    assert!(rendered_text(&state).contains("Connexion…"));

    state
        .shell
        .login_mut()
        .unwrap()
        .finish_submit(&Err(ClientError::missing_token()));

    assert!(rendered_text(&state).contains("Token absent de la réponse."));
}

/// **VALUE**: Verifies the loading message is shown alone before the list arrives.
#[test]
fn given_pending_fetch_when_rendered_then_loading_message_shown() {
    let (state, _) = AppState::start(Some(&token("T1")));

    let text = rendered_text(&state);

    assert!(text.contains("Chargement des documents…"));
    assert!(!text.contains("Liste des documents"));
    assert!(!text.contains("Voir"));
}

/// **VALUE**: Verifies each document is one row with its link label.
#[test]
fn given_loaded_list_when_rendered_then_one_row_per_document() {
    let (mut state, fetch) = AppState::start(Some(&token("T1")));
    let fetch = fetch.unwrap();
    state.shell.apply_fetch(
        &fetch.generation,
        Ok(DocumentList {
            documents: vec![Document::new("a.pdf", "http://x/a.pdf")],
        }),
    );

    let text = rendered_text(&state);

    let rows: Vec<&str> = text.lines().filter(|line| line.contains("a.pdf")).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("[Voir]"));
    assert!(text.contains("Liste des documents"));
    assert!(text.contains("Se déconnecter"));
    assert!(!text.contains("Chargement"));
}

/// **VALUE**: Verifies a fetch failure replaces the screen with its message.
///
/// **BUG THIS CATCHES**: Would catch the list title or the link actions being
/// drawn around the error.
#[test]
fn given_failed_fetch_when_rendered_then_only_message_shown() {
    let (mut state, fetch) = AppState::start(Some(&token("T1")));
    let fetch = fetch.unwrap();
    state.shell.apply_fetch(
        &fetch.generation,
        Err(ClientError::from_response(401, br#"{"message": "expired"}"#)),
    );

    let text = rendered_text(&state);

    assert!(text.contains("expired"));
    assert!(!text.contains("Chargement"));
    assert!(!text.contains("Liste des documents"));
    assert!(!text.contains("Voir"));
    assert!(!text.contains("Se déconnecter"));
}
