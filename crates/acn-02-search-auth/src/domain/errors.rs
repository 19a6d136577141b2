//! # Search Authentication Errors

use thiserror::Error;

/// Errors from search request signing and response validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchAuthError {
    /// No derived key for the environment (salt, identifier or account key
    /// missing). The request must not be sent.
    #[error("No derived key available for search environment {env}")]
    MissingDerivedKey {
        /// Environment the request targeted.
        env: String,
    },

    /// Response carried no `Pragma` header.
    #[error("Response has no Pragma header")]
    MissingPragma,

    /// `Pragma` header present without a terminated `hmac_digest`.
    #[error("Pragma header has no hmac_digest")]
    MalformedPragma,

    /// Digest does not match the response body and request nonce.
    #[error("Response hmac_digest does not match")]
    DigestMismatch,
}
