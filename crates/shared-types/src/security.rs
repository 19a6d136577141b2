//! # Receiver-Side Checks
//!
//! What the network service does with an incoming envelope before it trusts
//! it. The loopback service in `acn-03-network-client` uses these to play
//! the server side in tests.
//!
//! | Check | Failure | Wire code |
//! |-------|---------|-----------|
//! | `time + MAX_AGE >= now` | `TooOld` | 1600 |
//! | `time <= now + MAX_FUTURE_SKEW` | `FromFuture` | 1500 |
//! | nonce unseen within the window | replay | 1300 |
//!
//! All times are Unix seconds taken from the caller's clock, so a fixed test
//! clock drives both the window and nonce retention.

use parking_lot::Mutex;
use shared_crypto::SecretKey;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

// =============================================================================
// WINDOW
// =============================================================================

/// How far ahead of the receiver's clock a request may be (seconds).
pub const MAX_FUTURE_SKEW: u64 = 15 * 60;

/// How far behind the receiver's clock a request may be (seconds).
pub const MAX_AGE: u64 = 15 * 60;

/// How long a seen nonce is remembered. Covers the whole window, so a
/// replay is either remembered or already outside the window.
pub const NONCE_RETENTION: u64 = MAX_AGE + MAX_FUTURE_SKEW;

/// Entry count that triggers a sweep of expired nonces.
pub const NONCE_SWEEP_THRESHOLD: usize = 100_000;

/// Authenticator time outside the accepted window.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeWindowError {
    /// Older than `now - MAX_AGE`.
    #[error("Message timestamp {timestamp} is too old (now {now})")]
    TooOld { timestamp: u64, now: u64 },

    /// Later than `now + MAX_FUTURE_SKEW`.
    #[error("Message timestamp {timestamp} is in the future (now {now})")]
    FromFuture { timestamp: u64, now: u64 },
}

/// Check an authenticator time against the receiver's clock. Both ends of
/// the window are inclusive.
pub fn validate_timestamp(timestamp: u64, now: u64) -> Result<(), TimeWindowError> {
    if timestamp.saturating_add(MAX_AGE) < now {
        return Err(TimeWindowError::TooOld { timestamp, now });
    }
    if timestamp > now.saturating_add(MAX_FUTURE_SKEW) {
        return Err(TimeWindowError::FromFuture { timestamp, now });
    }
    Ok(())
}

/// Wall-clock Unix seconds; 0 if the system clock is before the epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// =============================================================================
// NONCES
// =============================================================================

/// Nonces seen by a receiver, each remembered for [`NONCE_RETENTION`].
#[derive(Debug, Default)]
pub struct NonceCache {
    /// nonce -> Unix second it may be forgotten
    seen: Mutex<HashMap<String, u64>>,
}

impl NonceCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `nonce` as seen at `now`. Returns `false` if it was already
    /// seen and not yet forgotten.
    pub fn check_and_insert(&self, nonce: &str, now: u64) -> bool {
        let mut seen = self.seen.lock();

        if seen.len() >= NONCE_SWEEP_THRESHOLD {
            seen.retain(|_, forget_at| *forget_at > now);
        }

        if seen.get(nonce).is_some_and(|forget_at| *forget_at > now) {
            return false;
        }

        seen.insert(nonce.to_string(), now.saturating_add(NONCE_RETENTION));
        true
    }

    /// Forget every nonce.
    pub fn clear(&self) {
        self.seen.lock().clear();
    }

    /// Number of remembered nonces, expired ones included until the next
    /// sweep.
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    /// True when nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// KEYS
// =============================================================================

/// Shared secret lookup by the clear-text `identifier` of an authenticator.
pub trait KeyProvider: Send + Sync {
    /// Key for `identifier`, or `None` to reject the message.
    fn get_shared_secret(&self, identifier: &str) -> Option<SecretKey>;
}

impl KeyProvider for HashMap<String, SecretKey> {
    fn get_shared_secret(&self, identifier: &str) -> Option<SecretKey> {
        self.get(identifier).cloned()
    }
}
