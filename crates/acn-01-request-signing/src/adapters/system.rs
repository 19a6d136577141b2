//! System clock and OS-random nonces.

use crate::ports::outbound::{Clock, NonceSource};
use shared_crypto::generate_nonce;
use shared_types::current_timestamp;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        current_timestamp()
    }
}

/// URL-safe base64 of 24 bytes from the OS RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonceSource;

impl NonceSource for RandomNonceSource {
    fn nonce(&self) -> String {
        generate_nonce()
    }
}
