//! # Signing Errors
//!
//! Error types for authenticator construction and response validation.

use thiserror::Error;

/// Errors that prevent a request from being signed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// No shared secret is available (subscription not established or expired).
    /// The call must not be attempted.
    #[error("No key available; request cannot be authenticated")]
    MissingKey,
}

/// Reasons a response authenticator is rejected.
///
/// Checks run in this order and stop at the first failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No shared secret to recompute the hash with.
    #[error("No key available to validate the response")]
    MissingKey,

    /// The response does not echo the request nonce.
    #[error("Response nonce does not match the request nonce")]
    NonceMismatch,

    /// The response time is not strictly later than the request time.
    #[error("Response time {response_time} is not after request time {request_time}")]
    StaleResponse {
        request_time: u64,
        response_time: u64,
    },

    /// The recomputed hash differs from the one carried by the response.
    #[error("Response hash does not match")]
    HashMismatch,
}

impl ValidationError {
    /// Short name of the failing check, for logs.
    pub fn check(&self) -> &'static str {
        match self {
            ValidationError::MissingKey => "key",
            ValidationError::NonceMismatch => "nonce",
            ValidationError::StaleResponse { .. } => "time",
            ValidationError::HashMismatch => "hash",
        }
    }
}
