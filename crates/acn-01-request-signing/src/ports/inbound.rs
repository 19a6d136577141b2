//! # Inbound Ports (Driving Ports / API)
//!
//! The API network clients use to sign calls and trust responses.

use crate::domain::errors::{SigningError, ValidationError};
use shared_crypto::SecretKey;
use shared_types::{Authenticator, Params, SignedEnvelope};

/// Primary Request Signing API.
///
/// Implementations must be thread-safe (`Send + Sync`). They hold no
/// per-call state: every signed request carries its own authenticator and
/// its response is validated against exactly that authenticator.
pub trait RequestSigningApi: Send + Sync {
    /// Build a fresh authenticator for `params` using the current time and a
    /// new nonce.
    ///
    /// # Errors
    /// * `SigningError::MissingKey` - `key` is empty; do not attempt the call
    fn build_authenticator(
        &self,
        key: &SecretKey,
        params: Params,
    ) -> Result<Authenticator, SigningError>;

    /// Wrap `body` in a signed envelope. The body keeps its `identifier`;
    /// only the hashed copy drops it.
    fn sign(&self, key: &SecretKey, body: Params) -> Result<SignedEnvelope, SigningError>;

    /// Check `response` against the request authenticator it answers.
    fn validate_response(
        &self,
        key: &SecretKey,
        response: &SignedEnvelope,
        request: &Authenticator,
    ) -> Result<(), ValidationError>;

    /// Validate and hand back the trusted response body.
    fn open_response(
        &self,
        key: &SecretKey,
        request: &SignedEnvelope,
        response: SignedEnvelope,
    ) -> Result<Params, ValidationError> {
        self.validate_response(key, &response, &request.authenticator)?;
        Ok(response.body)
    }
}
