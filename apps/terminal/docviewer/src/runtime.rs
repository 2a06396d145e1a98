//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! ## Inbox Pattern
//!
//! - Spawned tasks send their outcome as a `UiEvent` to the inbox
//! - Session changes are read from the session store's watch channel
//! - Each loop iteration drains both, then polls the terminal
//! - State is only ever mutated on the loop's thread

use crate::effects::UiEffect;
use crate::error::AppError;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, TuiTerminal};
use crate::{render, update};

use client_core::session::{SessionStore, TokenReceiver};

use common::ErrorLocation;

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event;
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Terminal poll timeout when nothing else is pending.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub type InboxSender = mpsc::UnboundedSender<UiEvent>;
pub type InboxReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn inbox() -> (InboxSender, InboxReceiver) {
    mpsc::unbounded_channel()
}

// ============================================================================
// Effect execution
// ============================================================================

/// Executes effects against the session store.
///
/// Async work is spawned on the ambient tokio runtime and reports back
/// through the inbox.
pub struct EffectRunner {
    session: Arc<SessionStore>,
    inbox_tx: InboxSender,
}

impl EffectRunner {
    pub fn new(session: Arc<SessionStore>, inbox_tx: InboxSender) -> Self {
        Self { session, inbox_tx }
    }

    pub fn execute_all(&self, state: &mut AppState, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute(state, effect);
        }
    }

    pub fn execute(&self, state: &mut AppState, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                info!("Quit requested");
                state.should_quit = true;
            }
            UiEffect::OpenUrl { url } => {
                debug!("Opening {url}");
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {url}: {e}");
                }
            }
            UiEffect::Logout => match state.shell.documents_mut() {
                Some(documents) => documents.logout(&self.session),
                None => self.session.logout(),
            },
            UiEffect::Login(request) => {
                let session = Arc::clone(&self.session);
                self.spawn_effect(async move {
                    let result = session.login(&request.credentials).await;
                    UiEvent::LoginFinished {
                        screen: request.screen,
                        result,
                    }
                });
            }
            UiEffect::Fetch(request) => {
                let api = self.session.api().clone();
                self.spawn_effect(async move {
                    let result = request.execute(&api).await;
                    UiEvent::FetchFinished {
                        generation: request.generation,
                        result,
                    }
                });
            }
        }
    }

    fn spawn_effect<Fut>(&self, future: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            // The receiver is gone only once the UI has shut down.
            let _ = tx.send(future.await);
        });
    }
}

// ============================================================================
// Session changes
// ============================================================================

/// Turns session store notifications into `SessionChanged` events.
pub struct SessionWatcher {
    rx: TokenReceiver,
}

impl SessionWatcher {
    /// Start watching from the session's current value; only later changes
    /// are reported.
    pub fn new(rx: TokenReceiver) -> Self {
        Self { rx }
    }

    pub fn poll(&mut self) -> Option<UiEvent> {
        match self.rx.has_changed() {
            Ok(true) => Some(UiEvent::SessionChanged(self.rx.borrow_and_update().clone())),
            Ok(false) | Err(_) => None,
        }
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Full-screen runtime. Restores the terminal when `run` returns.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    pub state: AppState,
    effects: EffectRunner,
    inbox_rx: InboxReceiver,
    session_changes: SessionWatcher,
}

impl TuiRuntime {
    /// Set up the terminal and mount the screen matching the restored
    /// session. Must be called inside a tokio runtime.
    pub fn new(session: Arc<SessionStore>) -> Result<Self, AppError> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal()?;

        let session_changes = SessionWatcher::new(session.subscribe());
        let (mut state, fetch) = AppState::start(session.token().as_ref());
        let (inbox_tx, inbox_rx) = inbox();
        let effects = EffectRunner::new(session, inbox_tx);

        if let Some(fetch) = fetch {
            effects.execute(&mut state, UiEffect::Fetch(fetch));
        }

        Ok(Self {
            terminal,
            state,
            effects,
            inbox_rx,
            session_changes,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        let result = self.event_loop();
        let restored = terminal::restore_terminal();
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<(), AppError> {
        let mut dirty = true;

        while !self.state.should_quit {
            if dirty {
                self.draw()?;
            }

            let events = self.collect_events()?;
            dirty = !events.is_empty();

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.effects.execute_all(&mut self.state, effects);
            }
        }

        Ok(())
    }

    #[track_caller]
    fn draw(&mut self) -> Result<(), AppError> {
        let state = &self.state;
        self.terminal
            .draw(|frame| render::render(state, frame))
            .map_err(|e| AppError::Terminal {
                message: format!("Failed to draw: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        Ok(())
    }

    /// Collect session changes, task outcomes and terminal input.
    #[track_caller]
    fn collect_events(&mut self) -> Result<Vec<UiEvent>, AppError> {
        let mut events = Vec::new();

        if let Some(event) = self.session_changes.poll() {
            events.push(event);
        }

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_duration = if events.is_empty() {
            IDLE_POLL_DURATION
        } else {
            Duration::ZERO
        };

        let terminal_error = |e: std::io::Error| AppError::Terminal {
            message: format!("Failed to read terminal input: {e}"),
            location: ErrorLocation::from(Location::caller()),
        };

        if event::poll(poll_duration).map_err(terminal_error)? {
            events.push(UiEvent::Terminal(event::read().map_err(terminal_error)?));
            while event::poll(Duration::ZERO).map_err(terminal_error)? {
                events.push(UiEvent::Terminal(event::read().map_err(terminal_error)?));
            }
        }

        Ok(events)
    }
}
