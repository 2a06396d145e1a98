//! File logging for the docviewer terminal application.
//!
//! Stdout belongs to the terminal UI, so records only go to
//! `<log_dir>/docviewer.log`.

use crate::error::AppError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use fern::Dispatch;
use humantime::format_rfc3339;
use log::{LevelFilter, debug, info};

pub const LOG_FILE_NAME: &str = "docviewer.log";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Log file of the installed logger. `None` until an attempt succeeds, so a
/// failed attempt may be retried with another directory.
static ACTIVE_LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Install the global file logger.
///
/// Once a logger is installed, later calls return Ok without changing it,
/// whatever directory they pass.
///
/// # Errors
/// [`AppError::Startup`] if the log file cannot be opened or another logger
/// was already installed by someone else.
pub fn initialize(log_dir: &Path) -> Result<(), AppError> {
    let mut active = ACTIVE_LOG_FILE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = active.as_ref() {
        debug!("Logger already writing to {}", path.display());
        return Ok(());
    }

    let path = log_dir.join(LOG_FILE_NAME);
    install(&path)?;
    info!("Logging at {LOG_LEVEL:?} to {}", path.display());
    *active = Some(path);

    Ok(())
}

#[track_caller]
fn install(path: &Path) -> Result<(), AppError> {
    let startup_error = |message: String| AppError::Startup {
        message,
        location: ErrorLocation::from(Location::caller()),
    };

    let file = fern::log_file(path)
        .map_err(|e| startup_error(format!("Cannot open {}: {e}", path.display())))?;

    Dispatch::new()
        .level(LOG_LEVEL)
        .level_for("hyper_util", LevelFilter::Info)
        .level_for("reqwest", LevelFilter::Info)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {} [{}:{}]",
                format_rfc3339(SystemTime::now()),
                record.level(),
                message,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0)
            ))
        })
        .chain(file)
        .apply()
        .map_err(|e| startup_error(format!("Cannot install logger: {e}")))
}
