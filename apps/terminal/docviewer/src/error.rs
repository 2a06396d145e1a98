use client_core::error::CoreError;

use common::ErrorLocation;

use thiserror::Error;

/// Errors that stop the application before or while the terminal UI runs.
///
/// Failures of the two remote calls never reach this type; the screens
/// display them instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup step of this app failed (data directory, log file)
    #[error("Startup Error: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
    },

    /// Terminal could not be set up, drawn to or restored
    #[error("Terminal Error: {message} {location}")]
    Terminal {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (config, endpoints, storage)
    #[error(transparent)]
    Core(#[from] CoreError),
}
