//! # Response Validation
//!
//! A response body is trusted only when, in order:
//!
//! 1. its nonce equals the request nonce,
//! 2. its time is **strictly** later than the request time,
//! 3. its hash equals the hash recomputed over its own time, nonce and body.
//!
//! The scheme for step 3 is inferred once from the response body.

use super::errors::ValidationError;
use super::hash::compute_hash;
use shared_crypto::SecretKey;
use shared_types::{Authenticator, RpcVersion, SignedEnvelope};
use subtle::ConstantTimeEq;

/// Validate `response` against the authenticator of the request it answers.
///
/// # Errors
///
/// The first failing check, see [`ValidationError`].
pub fn validate_response(
    key: &SecretKey,
    response: &SignedEnvelope,
    request: &Authenticator,
) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::MissingKey);
    }

    let received = &response.authenticator;

    if received.nonce != request.nonce {
        return Err(ValidationError::NonceMismatch);
    }

    if request.time >= received.time {
        return Err(ValidationError::StaleResponse {
            request_time: request.time,
            response_time: received.time,
        });
    }

    let version = RpcVersion::from_params(&response.body);
    let expected = compute_hash(key, received.time, &received.nonce, version, &response.body);
    if !bool::from(expected.as_bytes().ct_eq(received.hash.as_bytes())) {
        return Err(ValidationError::HashMismatch);
    }

    Ok(())
}

/// Boolean form of [`validate_response`].
pub fn is_valid_response(key: &SecretKey, response: &SignedEnvelope, request: &Authenticator) -> bool {
    validate_response(key, response, request).is_ok()
}
