use thiserror::Error;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Failed to connect or the transfer broke off
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request to '{url}' timed out after {duration}s")]
    Timeout { url: String, duration: u64 },

    /// Catalog answered with a non-success status
    #[error("Catalog error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteError {
    /// Short classification for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            RemoteError::Build(_) => "build_error",
            RemoteError::Connection { .. } => "connection_error",
            RemoteError::Timeout { .. } => "timeout",
            RemoteError::Status { .. } => "status_error",
            RemoteError::Decode { .. } => "decode_error",
        }
    }
}
