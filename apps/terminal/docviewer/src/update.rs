//! Reducer: applies one event to the state and returns the effects to run.

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::input;
use crate::state::AppState;

use crossterm::event::{Event, KeyEventKind};
use log::debug;

pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            input::handle_key(state, key)
        }
        UiEvent::Terminal(_) => Vec::new(),
        UiEvent::SessionChanged(token) => state
            .shell
            .sync(token.as_ref())
            .map(UiEffect::Fetch)
            .into_iter()
            .collect(),
        UiEvent::LoginFinished { screen, result } => {
            match state.shell.login_mut() {
                Some(login) if login.instance() == screen => login.finish_submit(&result),
                _ => debug!("Dropping login outcome for a screen that is gone"),
            }
            Vec::new()
        }
        UiEvent::FetchFinished { generation, result } => {
            state.shell.apply_fetch(&generation, result);
            Vec::new()
        }
    }
}
