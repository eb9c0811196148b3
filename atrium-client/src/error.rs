//! Client-side error type.

use atrium_model::ErrorKind;
use thiserror::Error;

/// Failures seen by a client talking to the catalog service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server could not be reached or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the status reason.
        message: String,
        /// Classification from the error body, when present.
        kind: Option<ErrorKind>,
    },

    /// A response or frame did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classification for the UI. Unclassified server failures count as
    /// storage errors, unreachable services as transport errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::TransportError,
            ClientError::Server { kind: Some(kind), .. } => *kind,
            ClientError::Server { status, .. } if *status == 503 => {
                ErrorKind::TransportError
            }
            ClientError::Server { status, .. } if (400..500).contains(status) => {
                ErrorKind::ValidationError
            }
            ClientError::Server { .. } | ClientError::Decode(_) => {
                ErrorKind::StorageError
            }
        }
    }

    /// Whether the user can fix the problem by changing their input.
    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
