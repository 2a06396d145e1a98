use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Corrupt Error: {path}: {reason} {location}")]
    Corrupt {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },
}

impl StorageError {
    pub fn user_message(&self) -> String {
        match self {
            StorageError::Read { path, source, .. } => {
                format!("Cannot read {}: {source}", path.display())
            }
            StorageError::Write { path, source, .. } => {
                format!("Cannot write {}: {source}", path.display())
            }
            StorageError::Corrupt { path, reason, .. } => {
                format!("Corrupt storage file {}: {reason}", path.display())
            }
        }
    }
}
