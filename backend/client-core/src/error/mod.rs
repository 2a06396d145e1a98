pub mod client;
pub mod config;
pub mod storage;

pub use client::{ClientError, MISSING_TOKEN_MESSAGE};
pub use config::ConfigError;
pub use storage::StorageError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] client::ClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Storage(#[from] storage::StorageError),
}
