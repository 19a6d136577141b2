//! Wire encodings for digests and nonces.

use crate::CryptoError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

/// Standard base64 with padding (legacy authenticator hashes).
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// URL- and cookie-safe base64 without padding (nonces).
pub fn encode_base64_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex (either case).
///
/// # Errors
///
/// Returns `CryptoError::InvalidHex` on odd length or non-hex characters.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))
}
