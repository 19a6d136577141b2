//! # Request Signing Service
//!
//! Application service implementing `RequestSigningApi`.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`RequestSigningApi`)
//! - Uses the outbound ports (`Clock`, `NonceSource`) for time and nonces
//! - Delegates hashing and validation to the domain layer

use crate::adapters::system::{RandomNonceSource, SystemClock};
use crate::domain::authenticator::build_authenticator;
use crate::domain::errors::{SigningError, ValidationError};
use crate::domain::validator::validate_response;
use crate::ports::inbound::RequestSigningApi;
use crate::ports::outbound::{Clock, NonceSource};
use shared_crypto::SecretKey;
use shared_types::{Authenticator, Params, SignedEnvelope};
use tracing::{debug, warn};

/// Request signer.
///
/// Stateless apart from its clock and nonce source, so one instance can be
/// shared by any number of concurrent calls.
pub struct RequestSigner<C: Clock, N: NonceSource> {
    clock: C,
    nonces: N,
}

impl RequestSigner<SystemClock, RandomNonceSource> {
    /// Signer backed by the system clock and the OS RNG.
    pub fn system() -> Self {
        Self::new(SystemClock, RandomNonceSource)
    }
}

impl<C: Clock, N: NonceSource> RequestSigner<C, N> {
    /// Create a new signer.
    ///
    /// # Arguments
    /// * `clock` - Source of the authenticator time
    /// * `nonces` - Source of per-call nonces
    pub fn new(clock: C, nonces: N) -> Self {
        Self { clock, nonces }
    }

    /// The clock this signer reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock, N: NonceSource> RequestSigningApi for RequestSigner<C, N> {
    fn build_authenticator(
        &self,
        key: &SecretKey,
        params: Params,
    ) -> Result<Authenticator, SigningError> {
        if key.is_empty() {
            warn!("Refusing to sign request without a key");
            return Err(SigningError::MissingKey);
        }
        let nonce = self.nonces.nonce();
        let time = self.clock.now();
        let authenticator = build_authenticator(key, params, time, nonce)?;
        debug!(time = authenticator.time, nonce = %authenticator.nonce, "Built authenticator");
        Ok(authenticator)
    }

    fn sign(&self, key: &SecretKey, body: Params) -> Result<SignedEnvelope, SigningError> {
        let authenticator = self.build_authenticator(key, body.clone())?;
        Ok(SignedEnvelope {
            body,
            authenticator,
        })
    }

    fn validate_response(
        &self,
        key: &SecretKey,
        response: &SignedEnvelope,
        request: &Authenticator,
    ) -> Result<(), ValidationError> {
        validate_response(key, response, request).map_err(|e| {
            warn!(check = e.check(), nonce = %request.nonce, "Response failed validation");
            e
        })
    }
}
