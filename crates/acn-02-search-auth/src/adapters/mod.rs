//! # Adapters Layer
//!
//! Concrete sources of derivation inputs.

pub mod static_source;
