//! # Network Errors
//!
//! | Variant | Cause | Caller treatment |
//! |---------|-------|------------------|
//! | `Transport` | connection, timeout | transient |
//! | `Server` | non-envelope error status, malformed JSON | transient |
//! | `Protocol` | error envelope with a code | per code |
//! | `Authentication` | response failed local validation | fatal to the call |
//! | `Signing` | no key to sign with | call never sent |
//! | `Encoding` | signed request not serializable | call never sent |

use acn_01_request_signing::{SigningError, ValidationError};
use shared_types::ErrorCode;
use thiserror::Error;

/// Failure reported by the transport before any response arrived.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Errors from a signed network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection failure or timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered without a usable envelope.
    #[error("Server error (HTTP {status}): {reason}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// What was wrong with the answer.
        reason: String,
    },

    /// The server answered with an error envelope.
    #[error("Remote error {code}: {message}")]
    Protocol {
        /// Error code.
        code: ErrorCode,
        /// Server message.
        message: String,
    },

    /// The response envelope did not validate. Its body is discarded.
    #[error("Response authentication failed: {0}")]
    Authentication(#[from] ValidationError),

    /// The request could not be signed.
    #[error("Request not sent: {0}")]
    Signing(#[from] SigningError),

    /// The signed request could not be serialized.
    #[error("Request not sent: encoding failed: {0}")]
    Encoding(String),

    /// A validated body lacked a field the call requires.
    #[error("Unexpected response body: {0}")]
    InvalidBody(String),
}

impl From<TransportError> for NetworkError {
    fn from(e: TransportError) -> Self {
        NetworkError::Transport(e.0)
    }
}

impl NetworkError {
    /// Remote error code, if the server sent one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            NetworkError::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True for failures that say nothing about the subscription itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, NetworkError::Transport(_) | NetworkError::Server { .. })
    }
}
