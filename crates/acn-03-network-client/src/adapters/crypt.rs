//! Salted SHA-1 password crypt.
//!
//! `key = hex(SHA1(hash_setting ‖ password))` for algorithm `sha1`. This is
//! the scheme the loopback service expects; a production site plugs its own
//! password hasher in through [`PasswordCrypt`].

use crate::ports::outbound::{CommunicationSettings, PasswordCrypt};
use shared_crypto::{encode_hex, sha1_digest, SecretKey};

/// Algorithm name advertised for this scheme.
pub const SALTED_SHA1: &str = "sha1";

/// Salted SHA-1 crypt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedSha1Crypt;

impl PasswordCrypt for SaltedSha1Crypt {
    fn crypt(&self, password: &str, settings: &CommunicationSettings) -> Option<SecretKey> {
        if settings.algorithm != SALTED_SHA1 || settings.hash_setting.is_empty() {
            return None;
        }
        let input = format!("{}{}", settings.hash_setting, password);
        Some(SecretKey::from(encode_hex(&sha1_digest(input.as_bytes()))))
    }
}
