//! # Domain Layer
//!
//! Pure signing logic with no I/O dependencies.
//! Time and nonces are passed in explicitly.

pub mod authenticator;
pub mod canonical;
pub mod errors;
pub mod hash;
pub mod validator;
