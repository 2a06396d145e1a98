//! Key bindings.
//!
//! | Screen    | Key                     | Action              |
//! |-----------|-------------------------|---------------------|
//! | any       | `Esc`, `Ctrl+C`         | quit                |
//! | login     | `Tab`, `Up`, `Down`     | switch field        |
//! | login     | `Enter`                 | submit              |
//! | documents | `Up`, `Down`            | move selection      |
//! | documents | `Enter`                 | open selected link  |
//! | documents | `Ctrl+L`                | log out             |

use crate::effects::UiEffect;
use crate::state::AppState;

use client_core::screens::{DocumentScreen, LoginScreen, Screen};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        _ => {}
    }

    match state.shell.screen_mut() {
        Screen::Login(login) => handle_login_key(login, key.code, ctrl),
        Screen::Documents(documents) => handle_documents_key(documents, key.code, ctrl),
    }
}

fn handle_login_key(login: &mut LoginScreen, code: KeyCode, ctrl: bool) -> Vec<UiEffect> {
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => login.focus_next(),
        KeyCode::Enter => return login.begin_submit().map(UiEffect::Login).into_iter().collect(),
        KeyCode::Backspace => login.backspace(),
        KeyCode::Char(c) if !ctrl => login.input_char(c),
        _ => {}
    }
    Vec::new()
}

fn handle_documents_key(
    documents: &mut DocumentScreen,
    code: KeyCode,
    ctrl: bool,
) -> Vec<UiEffect> {
    match code {
        KeyCode::Up => documents.select_previous(),
        KeyCode::Down => documents.select_next(),
        KeyCode::Enter => {
            return documents
                .selected_document()
                .map(|document| UiEffect::OpenUrl {
                    url: document.url.clone(),
                })
                .into_iter()
                .collect();
        }
        KeyCode::Char('l') if ctrl => return vec![UiEffect::Logout],
        _ => {}
    }
    Vec::new()
}
