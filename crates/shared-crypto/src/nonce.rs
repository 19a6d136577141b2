//! # Nonce Generation
//!
//! Nonces travel in JSON bodies and in `Cookie` headers, so they are rendered
//! as URL-safe base64 without padding.

use crate::encoding::encode_base64_url;
use rand::rngs::OsRng;
use rand::RngCore;

/// Raw entropy per nonce.
pub const NONCE_BYTES: usize = 24;

/// Fill a fresh buffer with `len` bytes from the OS RNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a nonce from [`NONCE_BYTES`] random bytes.
pub fn generate_nonce() -> String {
    encode_base64_url(&random_bytes(NONCE_BYTES))
}
