//! Platform-aware detection of the docviewer data directory.
//!
//! Lookup order:
//! 1. DOCVIEWER_DATA_DIR environment variable (explicit override)
//! 2. Platform-specific data directory via `dirs` crate
//! 3. Fallback paths for common configurations
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::APP_NAME;
use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const DATA_DIR_ENV_VAR: &str = "DOCVIEWER_DATA_DIR";

const STORAGE_FILE_NAME: &str = "storage.json";
const LOG_DIR_NAME: &str = "logs";

/// Where docviewer keeps its files.
#[derive(Debug, Clone)]
pub struct DocviewerPaths {
    /// Base data directory (e.g., ~/.local/share/docviewer on Linux).
    pub data_dir: PathBuf,
    /// Path to the durable key/value file holding the token.
    pub storage_file: PathBuf,
    /// Directory for docviewer.log.
    pub log_dir: PathBuf,
    /// How the path was determined.
    pub source: PathSource,
}

impl DocviewerPaths {
    pub fn from_data_dir(data_dir: &Path, source: PathSource) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            storage_file: data_dir.join(STORAGE_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            source,
        }
    }
}

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Set via DOCVIEWER_DATA_DIR.
    EnvVar,
    /// Detected via platform-specific XDG/AppData/Library path.
    PlatformDefault,
    /// Linux fallback (~/.local/share/docviewer).
    LinuxFallback,
    /// macOS fallback (~/Library/Application Support/docviewer).
    MacOSFallback,
    /// Windows fallback (%APPDATA%/docviewer).
    WindowsFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV_VAR}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::LinuxFallback => write!(f, "Linux fallback"),
            PathSource::MacOSFallback => write!(f, "macOS fallback"),
            PathSource::WindowsFallback => write!(f, "Windows fallback"),
        }
    }
}

/// Detect docviewer data paths.
///
/// # Errors
/// Returns `ConfigError::DirectoryDetection` if no valid path can be determined.
///
/// # Platform Behavior
/// - **Linux**: `$XDG_DATA_HOME/docviewer` or `~/.local/share/docviewer`
/// - **macOS**: `~/Library/Application Support/docviewer`
/// - **Windows**: `%LOCALAPPDATA%/docviewer`
pub fn detect_paths() -> Result<DocviewerPaths, ConfigError> {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV_VAR) {
        if !custom_dir.trim().is_empty() {
            let data_dir = PathBuf::from(&custom_dir);
            info!("Using {DATA_DIR_ENV_VAR} override: {:?}", data_dir);
            return Ok(DocviewerPaths::from_data_dir(&data_dir, PathSource::EnvVar));
        }
        warn!("{DATA_DIR_ENV_VAR} is set but empty, ignoring");
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        debug!("Platform data dir: {:?}", app_dir);
        return Ok(DocviewerPaths::from_data_dir(
            &app_dir,
            PathSource::PlatformDefault,
        ));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home).join(".local/share").join(APP_NAME);
            warn!("Using Linux fallback path: {:?}", data_dir);
            return Ok(DocviewerPaths::from_data_dir(
                &data_dir,
                PathSource::LinuxFallback,
            ));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_NAME);
            warn!("Using macOS fallback path: {:?}", data_dir);
            return Ok(DocviewerPaths::from_data_dir(
                &data_dir,
                PathSource::MacOSFallback,
            ));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = env::var("APPDATA") {
            let data_dir = PathBuf::from(appdata).join(APP_NAME);
            warn!("Using Windows fallback path: {:?}", data_dir);
            return Ok(DocviewerPaths::from_data_dir(
                &data_dir,
                PathSource::WindowsFallback,
            ));
        }
    }

    Err(ConfigError::DirectoryDetection {
        location: ErrorLocation::from(Location::caller()),
        reason: format!(
            "Cannot determine docviewer data directory. Set {DATA_DIR_ENV_VAR} environment variable."
        ),
    })
}
