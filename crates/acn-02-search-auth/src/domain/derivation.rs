//! # Key Derivation
//!
//! Per-environment search key derived from the account key.
//!
//! ```text
//! s       = identifier ‖ "solr" ‖ salt
//! padded  = s repeated until exactly 80 bytes (unchanged if already longer)
//! derived = hex(HMAC-SHA1(master_key, padded))
//! ```
//!
//! The derived key is the 40 ASCII bytes of the hex string, not the raw
//! digest. It is never transmitted.

use shared_crypto::{encode_hex, hmac_sha1, SecretKey};

/// Purpose tag mixed into the derivation string.
pub const SEARCH_PURPOSE: &str = "solr";

/// Target length of the padded derivation string.
pub const DERIVATION_PAD_LENGTH: usize = 80;

/// Everything needed to derive one environment's search key.
#[derive(Debug, Clone)]
pub struct DerivationInputs {
    /// Subscription-wide salt.
    pub salt: String,
    /// Search index identifier of the environment.
    pub identifier: String,
    /// Account key.
    pub master_key: SecretKey,
}

impl DerivationInputs {
    /// True when any input is missing.
    pub fn is_incomplete(&self) -> bool {
        self.salt.is_empty() || self.identifier.is_empty() || self.master_key.is_empty()
    }
}

/// Right-pad `input` to `length` bytes using copies of itself as filler.
///
/// Inputs already at or beyond `length` are returned unchanged.
pub fn pad_with_self(input: &[u8], length: usize) -> Vec<u8> {
    if input.is_empty() || input.len() >= length {
        return input.to_vec();
    }
    input.iter().copied().cycle().take(length).collect()
}

/// Derive the search key.
///
/// Returns `None` when salt, identifier or master key is empty. An absent
/// key means "signing impossible", never "sign with an empty key".
pub fn derive_key(salt: &str, identifier: &str, master_key: &SecretKey) -> Option<SecretKey> {
    if salt.is_empty() || identifier.is_empty() || master_key.is_empty() {
        return None;
    }
    let derivation = format!("{identifier}{SEARCH_PURPOSE}{salt}");
    let padded = pad_with_self(derivation.as_bytes(), DERIVATION_PAD_LENGTH);
    let digest = hmac_sha1(master_key.as_bytes(), &padded);
    Some(SecretKey::from(encode_hex(&digest)))
}

/// [`derive_key`] over a bundled set of inputs.
pub fn derive_from(inputs: &DerivationInputs) -> Option<SecretKey> {
    derive_key(&inputs.salt, &inputs.identifier, &inputs.master_key)
}
