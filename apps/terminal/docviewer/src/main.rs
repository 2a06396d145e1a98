use docviewer::error::AppError;
use docviewer::logger::initialize as LoggerInitialize;
use docviewer::runtime::TuiRuntime;

use client_core::api::ApiClient;
use client_core::config::{AppConfig, try_load_dotenv};
use client_core::error::CoreError;
use client_core::paths::detect_paths;
use client_core::session::SessionStore;
use client_core::storage::FileStorage;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("docviewer: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    // Before path detection: .env may set DOCVIEWER_DATA_DIR
    let dotenv = try_load_dotenv();

    let paths = detect_paths().map_err(CoreError::from)?;

    create_dir_all(&paths.log_dir).map_err(|e| AppError::Startup {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.log_dir)?;

    info!("docviewer starting");
    info!("Data directory ({}): {}", paths.source, paths.data_dir.display());
    if let Some(path) = &dotenv.path {
        info!("Loaded .env from {}", path.display());
    }

    // One runtime for every spawned request; the UI loop runs on this thread.
    let runtime = tokio::runtime::Runtime::new().map_err(|e| AppError::Startup {
        message: format!("Failed to create tokio runtime: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let _guard = runtime.enter();

    let config = AppConfig::load_or_init(&paths.data_dir).map_err(CoreError::from)?;
    info!("Authentication endpoint: {}", config.endpoints.auth_url);
    info!("Documents endpoint: {}", config.endpoints.documents_url);

    let api = ApiClient::new(&config).map_err(CoreError::from)?;
    let storage = Arc::new(FileStorage::new(&paths.storage_file));
    let session = Arc::new(SessionStore::restore(api, storage));

    let mut tui = TuiRuntime::new(session)?;
    let result = tui.run();

    info!("docviewer exiting");
    result
}
