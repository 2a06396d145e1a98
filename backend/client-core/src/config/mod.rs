//! `config.json` in the data directory: endpoint URLs and HTTP settings.
//!
//! Every field has a default, so a missing or partial file is fine. A file
//! that does not parse is an error rather than being replaced.

pub mod env;

pub use env::{EnvLoadResult, try_load_dotenv};

use crate::error::config::ConfigError;
use crate::fs::{read_optional, write_atomic};
use crate::{DEFAULT_AUTH_URL, DEFAULT_DOCUMENTS_URL};

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Token endpoint, receives the form-encoded credentials.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Listing endpoint, including its `project_id` query.
    #[serde(default = "default_documents_url")]
    pub documents_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            documents_url: default_documents_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout. Unset means requests wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoints: EndpointConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_documents_url() -> String {
    DEFAULT_DOCUMENTS_URL.to_string()
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

impl AppConfig {
    /// Read `{config_dir}/config.json`, or defaults if there is none.
    ///
    /// # Errors
    /// - [`ConfigError::Read`] if the file exists but cannot be read
    /// - [`ConfigError::Parse`] if it is not valid config JSON
    /// - any [`Self::validate`] error
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        Self::read(&config_path(config_dir)).map(Option::unwrap_or_default)
    }

    /// `Ok(None)` when the file does not exist.
    #[track_caller]
    fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = read_optional(path).map_err(|e| ConfigError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let Some(contents) = contents else {
            debug!("No config at {}", path.display());
            return Ok(None);
        };

        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        info!("Config loaded from {}", path.display());
        Ok(Some(config))
    }

    /// Validate, then atomically replace `{config_dir}/config.json`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let path = config_path(config_dir);
        let json = serde_json::to_vec_pretty(self).map_err(|e| ConfigError::Validation {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Config is not serializable: {e}"),
        })?;

        write_atomic(&path, &json).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Startup entry point: load the file, write defaults on first start so
    /// they can be edited, then apply environment overrides.
    pub fn load_or_init(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = match Self::read(&config_path(config_dir))? {
            Some(config) => config,
            None => {
                let defaults = Self::default();
                defaults.save(config_dir)?;
                defaults
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// - [`ConfigError::Validation`] for an unknown version or a zero timeout
    /// - [`ConfigError::InvalidEndpoint`] for a URL that is not http(s)
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=CONFIG_VERSION).contains(&self.version) {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Unsupported version {} (this build reads 1-{CONFIG_VERSION})",
                    self.version
                ),
            });
        }

        check_endpoint("auth_url", &self.endpoints.auth_url)?;
        check_endpoint("documents_url", &self.endpoints.documents_url)?;

        if self.http.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("http.request_timeout_secs must be at least 1"),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.http.request_timeout_secs.map(Duration::from_secs)
    }
}

#[track_caller]
fn check_endpoint(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        location: ErrorLocation::from(Location::caller()),
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}
