//! # Shared Crypto - Connector Authentication Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-1, RFC 2104 double-SHA1, HMAC-SHA1 | Authenticator hashes, search HMACs |
//! | `encoding` | base64 (standard / URL-safe), hex | Hash and nonce wire encodings |
//! | `nonce` | OS RNG | Per-request nonces |
//! | `keys` | - | Zeroizing shared-secret container |
//!
//! ## Security Properties
//!
//! - **Nonces**: 24 random bytes (192 bits). Uniqueness is probabilistic only;
//!   the birthday bound puts a collision at roughly 2^96 nonces per key.
//! - **Keys**: wiped from memory on drop, never printed by `Debug`.
//! - **Comparisons**: MAC verification is constant-time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod nonce;

// Re-exports
pub use encoding::{decode_hex, encode_base64, encode_base64_url, encode_hex};
pub use errors::CryptoError;
pub use hashing::{double_sha1, hmac_sha1, sha1_digest, verify_hmac_sha1, Sha1Digest};
pub use keys::SecretKey;
pub use nonce::{generate_nonce, random_bytes, NONCE_BYTES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
