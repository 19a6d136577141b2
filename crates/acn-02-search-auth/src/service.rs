//! # Search Authentication Service
//!
//! Implements `SearchAuthApi` with a lazily filled, per-environment derived
//! key cache.
//!
//! ## Cache Semantics
//!
//! - Populated on first use of an environment
//! - Incomplete inputs are not cached; the next call retries the source
//! - Never invalidated automatically: call `invalidate` or `clear` when the
//!   salt or account key changes

use crate::domain::cookie::{build_cookie, with_request_id};
use crate::domain::derivation::derive_from;
use crate::domain::errors::SearchAuthError;
use crate::domain::pragma::verify_digest;
use crate::ports::inbound::{SearchAuthApi, SearchRequest, SignedSearchRequest};
use crate::ports::outbound::{Clock, DerivationSource, NonceSource};
use parking_lot::RwLock;
use shared_crypto::SecretKey;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Search request signer and response validator.
pub struct SearchAuthenticator<S: DerivationSource, C: Clock, N: NonceSource> {
    source: S,
    clock: C,
    nonces: N,
    keys: RwLock<HashMap<String, SecretKey>>,
}

impl<S: DerivationSource, C: Clock, N: NonceSource> SearchAuthenticator<S, C, N> {
    /// Create a new authenticator with an empty key cache.
    pub fn new(source: S, clock: C, nonces: N) -> Self {
        Self {
            source,
            clock,
            nonces,
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// The derivation source backing this authenticator.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of environments with a cached key.
    pub fn cached_keys(&self) -> usize {
        self.keys.read().len()
    }

    /// Derived key for `env`, computing and caching it on first use.
    pub fn derived_key(&self, env: &str) -> Result<SecretKey, SearchAuthError> {
        if let Some(key) = self.keys.read().get(env) {
            return Ok(key.clone());
        }

        let key = self
            .source
            .inputs_for(env)
            .and_then(|inputs| derive_from(&inputs))
            .ok_or_else(|| {
                warn!(env, "No derived key for search environment");
                SearchAuthError::MissingDerivedKey { env: env.to_string() }
            })?;

        debug!(env, "Derived search key");
        let mut keys = self.keys.write();
        Ok(keys.entry(env.to_string()).or_insert(key).clone())
    }
}

impl<S: DerivationSource, C: Clock, N: NonceSource> SearchAuthApi for SearchAuthenticator<S, C, N> {
    fn sign_request(
        &self,
        env: &str,
        request: SearchRequest,
    ) -> Result<SignedSearchRequest, SearchAuthError> {
        let key = self.derived_key(env)?;
        let request_id = Uuid::new_v4().to_string();
        let path_and_query = with_request_id(request.path_and_query(), &request_id);

        let (signed, body) = match request {
            SearchRequest::Get { .. } => (path_and_query.clone(), None),
            SearchRequest::Post { body, .. } => (body.clone(), Some(body)),
        };

        let nonce = self.nonces.nonce();
        let time = self.clock.now();
        let cookie = build_cookie(&key, time, &nonce, &signed);
        debug!(env, request_id = %request_id, nonce = %nonce, "Signed search request");

        Ok(SignedSearchRequest {
            path_and_query,
            body,
            cookie,
            nonce,
            request_id,
        })
    }

    fn validate_response(
        &self,
        env: &str,
        nonce: &str,
        pragma: Option<&str>,
        body: &[u8],
    ) -> Result<(), SearchAuthError> {
        let key = self.derived_key(env)?;
        verify_digest(&key, nonce, pragma, body).map_err(|e| {
            warn!(env, error = %e, "Search response failed validation");
            e
        })
    }

    fn invalidate(&self, env: &str) {
        if self.keys.write().remove(env).is_some() {
            debug!(env, "Invalidated derived search key");
        }
    }

    fn clear(&self) {
        self.keys.write().clear();
        debug!("Cleared derived search keys");
    }
}
