//! # Authenticator Hash
//!
//! Dispatches on [`RpcVersion`]:
//!
//! | Version | Message | Output |
//! |---------|---------|--------|
//! | `Legacy` | `"{time}:{nonce}:{key}:{legacy_serialize(params)}"` | base64 of the digest |
//! | `V2` | `"{time}:{nonce}:{json_encode_params(params)}"` | lowercase hex |
//! | `PingOnly` | `"{time}:{nonce}"` | lowercase hex |
//!
//! The digest is always the RFC 2104 double-SHA1 construction keyed with the
//! shared secret (see `shared_crypto::double_sha1`). `time` is rendered as
//! plain decimal.

use super::canonical::{json_encode_params, legacy_serialize};
use shared_crypto::{double_sha1, encode_base64, encode_hex, SecretKey};
use shared_types::{Params, RpcVersion};

/// Build the exact byte string that gets hashed.
pub fn canonical_message(
    key: &SecretKey,
    time: u64,
    nonce: &str,
    version: RpcVersion,
    params: &Params,
) -> Vec<u8> {
    let mut message = format!("{time}:{nonce}").into_bytes();
    match version {
        RpcVersion::Legacy => {
            message.push(b':');
            message.extend_from_slice(key.as_bytes());
            message.push(b':');
            message.extend_from_slice(legacy_serialize(params).as_bytes());
        }
        RpcVersion::V2 => {
            message.push(b':');
            message.extend_from_slice(json_encode_params(params).as_bytes());
        }
        RpcVersion::PingOnly => {}
    }
    message
}

/// Compute the authenticator hash. Deterministic in all inputs.
pub fn compute_hash(
    key: &SecretKey,
    time: u64,
    nonce: &str,
    version: RpcVersion,
    params: &Params,
) -> String {
    let message = canonical_message(key, time, nonce, version, params);
    let digest = double_sha1(key.as_bytes(), &message);
    match version {
        RpcVersion::Legacy => encode_base64(&digest),
        RpcVersion::V2 | RpcVersion::PingOnly => encode_hex(&digest),
    }
}
