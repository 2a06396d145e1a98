// Unit tests for the reducer

use super::{key_event, signed_out, token};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::update::update;

use client_core::error::ClientError;
use client_core::screens::{DocumentsView, Route};

use models::DocumentList;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn submitted_login() -> (AppState, uuid::Uuid) {
    let mut state = signed_out();
    let login = state.shell.login_mut().unwrap();
    login.set_username("a@b.com");
    login.set_password("x");
    let request = login.begin_submit().unwrap();
    (state, request.screen)
}

/// **VALUE**: Verifies a new token routes to documents and dispatches a fetch.
#[test]
fn given_login_screen_when_session_starts_then_fetch_effect() {
    let mut state = signed_out();

    let effects = update(&mut state, UiEvent::SessionChanged(Some(token("T1"))));

    assert_eq!(state.shell.route(), Route::Documents);
    match effects.as_slice() {
        [UiEffect::Fetch(request)] => assert_eq!(request.token(), &token("T1")),
        other => panic!("Expected a single Fetch effect, got {other:?}"),
    }
}

/// **VALUE**: Verifies a cleared session routes back to login.
#[test]
fn given_document_screen_when_session_ends_then_login_screen() {
    let (mut state, _) = AppState::start(Some(&token("T1")));

    let effects = update(&mut state, UiEvent::SessionChanged(None));

    assert!(effects.is_empty());
    assert_eq!(state.shell.route(), Route::Login);
}

/// **VALUE**: Verifies a failed login shows its message on the screen that sent it.
#[test]
fn given_pending_login_when_failure_arrives_then_error_shown() {
    let (mut state, screen) = submitted_login();

    update(
        &mut state,
        UiEvent::LoginFinished {
            screen,
            result: Err(ClientError::missing_token()),
        },
    );

    let login = state.shell.login_mut().unwrap();
    assert_eq!(login.error(), Some("Token absent de la réponse."));
    assert!(!login.is_submitting());
}

/// **VALUE**: Verifies an outcome for a replaced login screen is dropped.
///
/// **BUG THIS CATCHES**: Would catch an old failure appearing on a fresh
/// login screen after a logout.
#[test]
fn given_login_screen_replaced_when_outcome_arrives_then_ignored() {
    let (_, old_screen) = submitted_login();
    let mut state = signed_out();

    update(
        &mut state,
        UiEvent::LoginFinished {
            screen: old_screen,
            result: Err(ClientError::missing_token()),
        },
    );

    assert_eq!(state.shell.login_mut().unwrap().error(), None);
}

/// **VALUE**: Verifies fetch outcomes reach the document screen.
#[test]
fn given_pending_fetch_when_outcome_arrives_then_list_loaded() {
    let (mut state, fetch) = AppState::start(Some(&token("T1")));
    let fetch = fetch.unwrap();

    update(
        &mut state,
        UiEvent::FetchFinished {
            generation: fetch.generation,
            result: Ok(DocumentList::default()),
        },
    );

    let documents = state.shell.documents_mut().unwrap();
    assert_eq!(documents.view(), DocumentsView::Loaded(&[]));
}

/// **VALUE**: Verifies key releases and resizes are ignored.
///
/// **BUG THIS CATCHES**: Would catch every character being typed twice on
/// terminals that report releases.
#[test]
fn given_key_release_when_updating_then_ignored() {
    let mut state = signed_out();
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );

    update(&mut state, UiEvent::Terminal(Event::Key(release)));
    update(&mut state, UiEvent::Terminal(Event::Resize(80, 24)));
    update(&mut state, key_event(KeyCode::Char('b')));

    assert_eq!(state.shell.login_mut().unwrap().username(), "b");
}
