//! # Authenticator Construction
//!
//! 1. Remove `identifier` from the parameters; it is echoed, never hashed.
//! 2. Infer the [`RpcVersion`] from what remains.
//! 3. Hash `(time, nonce, params)` with the shared secret.

use super::errors::SigningError;
use super::hash::compute_hash;
use serde_json::Value;
use shared_crypto::SecretKey;
use shared_types::{Authenticator, Params, RpcVersion};

/// Name of the clear-text identifier parameter.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Build an authenticator for `params` at `time` with `nonce`.
///
/// # Errors
///
/// Returns `SigningError::MissingKey` if `key` is empty. An empty key is never
/// used for signing.
pub fn build_authenticator(
    key: &SecretKey,
    mut params: Params,
    time: u64,
    nonce: String,
) -> Result<Authenticator, SigningError> {
    if key.is_empty() {
        return Err(SigningError::MissingKey);
    }

    let identifier = params.remove(IDENTIFIER_FIELD).map(|value| match value {
        Value::String(s) => s,
        other => other.to_string(),
    });
    let version = RpcVersion::from_params(&params);
    let hash = compute_hash(key, time, &nonce, version, &params);

    Ok(Authenticator {
        time,
        nonce,
        hash,
        identifier,
    })
}
