//! # Domain Layer
//!
//! Endpoint catalogue, client configuration, error taxonomy and response
//! classification. No I/O.

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod response;
