mod render;
mod update;

use crate::state::AppState;

use common::BearerToken;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn token(raw: &str) -> BearerToken {
    BearerToken::from_non_empty(raw.to_string()).unwrap()
}

pub(crate) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub(crate) fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub(crate) fn key_event(code: KeyCode) -> crate::events::UiEvent {
    crate::events::UiEvent::Terminal(Event::Key(key(code)))
}

/// State on the login screen.
pub(crate) fn signed_out() -> AppState {
    AppState::start(None).0
}
