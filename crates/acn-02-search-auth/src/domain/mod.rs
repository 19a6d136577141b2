//! # Domain Layer
//!
//! Pure search-authentication logic: key derivation, cookie construction and
//! `Pragma` digest checks. No clock, no RNG, no cache.

pub mod cookie;
pub mod derivation;
pub mod errors;
pub mod pragma;
