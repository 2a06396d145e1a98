use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data Directory Detection Error: {reason} {location}")]
    DirectoryDetection {
        location: ErrorLocation,
        reason: String,
    },

    /// An endpoint URL that does not parse or is not http(s).
    #[error("Invalid Endpoint Error: {field} = {value:?}: {reason} {location}")]
    InvalidEndpoint {
        location: ErrorLocation,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    Validation {
        location: ErrorLocation,
        reason: String,
    },
}
