//! Tri-state outcome shared by every asynchronous operation surfaced to observers.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared, clonable error cause.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Exactly one of loading, success with a payload, or error.
#[derive(Clone)]
pub enum ResultState<T> {
    Loading,
    Success(T),
    Error {
        message: String,
        cause: Option<Cause>,
    },
}

impl<T> ResultState<T> {
    pub fn error(message: impl Into<String>, cause: Option<Cause>) -> Self {
        ResultState::Error {
            message: message.into(),
            cause,
        }
    }

    /// Error state carrying `err`'s display text as the message and `err` as the cause.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        ResultState::Error {
            message,
            cause: Some(Arc::new(err)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultState::Error { .. })
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ResultState::Success(data) => Some(data),
            ResultState::Loading | ResultState::Error { .. } => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            ResultState::Success(data) => Some(data),
            ResultState::Loading | ResultState::Error { .. } => None,
        }
    }

    /// Message of an error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultState::Error { message, .. } => Some(message),
            ResultState::Loading | ResultState::Success(_) => None,
        }
    }

    pub fn error_cause(&self) -> Option<&Cause> {
        match self {
            ResultState::Error { cause, .. } => cause.as_ref(),
            ResultState::Loading | ResultState::Success(_) => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ResultState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultState::Loading => write!(f, "Loading"),
            ResultState::Success(data) => f.debug_tuple("Success").field(data).finish(),
            ResultState::Error { message, cause } => f
                .debug_struct("Error")
                .field("message", message)
                .field("cause", &cause.as_ref().map(|c| c.to_string()))
                .finish(),
        }
    }
}

/// Renders an error as message followed by its cause.
impl<T> fmt::Display for ResultState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultState::Loading => write!(f, "loading"),
            ResultState::Success(_) => write!(f, "success"),
            ResultState::Error { message, cause } => match cause {
                Some(cause) if message.is_empty() => write!(f, "{}", cause),
                Some(cause) => write!(f, "{} ({})", message, cause),
                None if message.is_empty() => write!(f, "unknown error"),
                None => write!(f, "{}", message),
            },
        }
    }
}
