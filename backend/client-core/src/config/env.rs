//! `.env` loading and environment overrides for endpoint URLs.

use super::AppConfig;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const AUTH_URL_ENV_VAR: &str = "DOCVIEWER_AUTH_URL";
pub const DOCUMENTS_URL_ENV_VAR: &str = "DOCVIEWER_DOCUMENTS_URL";

/// Result of attempting to load .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to loaded .env file, if found.
    pub path: Option<PathBuf>,
}

/// Attempts to load .env from the current directory, then the executable's.
pub fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult { path: Some(path) };
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return EnvLoadResult {
                            path: Some(env_path),
                        };
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    debug!("No .env file found");
    EnvLoadResult { path: None }
}

impl AppConfig {
    /// Replace endpoint URLs with DOCVIEWER_AUTH_URL / DOCVIEWER_DOCUMENTS_URL
    /// when those are set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_var(AUTH_URL_ENV_VAR) {
            info!("Auth endpoint overridden by {AUTH_URL_ENV_VAR}");
            self.endpoints.auth_url = url;
        }

        if let Some(url) = non_empty_var(DOCUMENTS_URL_ENV_VAR) {
            info!("Documents endpoint overridden by {DOCUMENTS_URL_ENV_VAR}");
            self.endpoints.documents_url = url;
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => None,
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Env var {} contains invalid unicode", name);
            None
        }
    }
}
