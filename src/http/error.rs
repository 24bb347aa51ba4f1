//! Failures raised by [`RequestLifecycle::send`](super::RequestLifecycle::send).

use thiserror::Error;

/// Shown when the server signals failure without a usable `message`.
pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again.";

/// Coarse classification of a [`RequestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered and reported failure.
    RequestFailed,
    /// The call could not complete: connection, body read, or parse.
    TransportFailure,
    /// The call was cancelled; never shown to the user.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum RequestError {
    /// Non-success status; carries the server's message.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::RequestFailed { .. } => ErrorKind::RequestFailed,
            RequestError::Transport(_) => ErrorKind::TransportFailure,
            RequestError::Decode(_) => ErrorKind::TransportFailure,
            RequestError::InvalidRequest(_) => ErrorKind::TransportFailure,
            RequestError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Stable identifier for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            RequestError::RequestFailed { .. } => "request_failed",
            RequestError::Transport(_) => "transport_error",
            RequestError::Decode(_) => "decode_error",
            RequestError::InvalidRequest(_) => "invalid_request",
            RequestError::Cancelled => "cancelled",
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::RequestFailed { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RequestError::Cancelled)
    }
}
