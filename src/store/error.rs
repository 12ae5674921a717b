use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O failed on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file '{path}' is corrupt: {source}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock store '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store task failed: {0}")]
    Task(String),
}
