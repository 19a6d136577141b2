//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Hex input could not be decoded
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}
