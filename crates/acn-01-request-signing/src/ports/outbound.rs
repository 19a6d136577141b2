//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators this subsystem needs from its environment.

/// Time source trait for testability.
pub trait Clock: Send + Sync {
    /// Current Unix time in whole seconds.
    fn now(&self) -> u64;
}

/// Source of single-use nonces.
///
/// Implementations must return a different value on every call and only
/// characters safe in a cookie value.
pub trait NonceSource: Send + Sync {
    /// A fresh nonce.
    fn nonce(&self) -> String;
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: NonceSource + ?Sized> NonceSource for std::sync::Arc<T> {
    fn nonce(&self) -> String {
        (**self).nonce()
    }
}
