//! Terminal lifecycle: raw mode, alternate screen and a panic hook that
//! puts the terminal back before the panic message is printed.

use crate::error::AppError;

use common::ErrorLocation;

use std::io::{self, Stdout};
use std::panic::{self, Location};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

#[track_caller]
fn terminal_error(context: &str, error: io::Error) -> AppError {
    AppError::Terminal {
        message: format!("{context}: {error}"),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Enable raw mode, enter the alternate screen and create the terminal.
///
/// Call [`install_panic_hook`] first.
pub fn setup_terminal() -> Result<TuiTerminal, AppError> {
    enable_raw_mode().map_err(|e| terminal_error("Failed to enable raw mode", e))?;

    let created = enter_alternate_screen().and_then(|stdout| {
        Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| terminal_error("Failed to create terminal", e))
    });

    undo_on_error(created, || {
        let _ = restore_terminal();
    })
}

fn enter_alternate_screen() -> Result<Stdout, AppError> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| terminal_error("Failed to enter alternate screen", e))?;
    Ok(stdout)
}

/// Run `undo` when a setup step after raw mode failed, so the error can be
/// printed on a normal terminal.
pub(crate) fn undo_on_error<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Leave the alternate screen and disable raw mode. Idempotent.
pub fn restore_terminal() -> Result<(), AppError> {
    execute!(io::stdout(), LeaveAlternateScreen)
        .map_err(|e| terminal_error("Failed to leave alternate screen", e))?;
    disable_raw_mode().map_err(|e| terminal_error("Failed to disable raw mode", e))
}

/// Restore the terminal before the original panic hook runs.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
