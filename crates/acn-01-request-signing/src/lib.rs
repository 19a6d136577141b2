//! # Request Signing Subsystem (ACN-01)
//!
//! Signs outbound Acquia Network calls and validates the paired responses.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): canonical encodings, hash dispatch,
//!   authenticator construction and response validation. No I/O, no clock.
//! - **Ports Layer** (`ports/`): `RequestSigningApi` (inbound), `Clock` and
//!   `NonceSource` (outbound)
//! - **Adapters Layer** (`adapters/`): system clock/RNG and fixed test doubles
//! - **Service Layer** (`service.rs`): `RequestSigner` wires domain to ports
//!
//! ## Protocol
//!
//! ```text
//! caller ──sign(key, body)──► RequestSigner ──► {body, authenticator}
//!                                                     │ HTTP (external)
//! caller ◄──trusted body── open_response ◄── {body, authenticator}
//! ```
//!
//! ## Security Notes
//!
//! - An empty key never signs anything; signing fails with
//!   `SigningError::MissingKey`
//! - The response must echo the request nonce and carry a strictly later time
//! - Each in-flight call validates against its own `Authenticator`; there is
//!   no shared "last nonce"

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::fixed::{FixedClock, FixedNonce, SequenceNonce};
pub use adapters::system::{RandomNonceSource, SystemClock};
pub use domain::authenticator::build_authenticator;
pub use domain::canonical::{json_encode_params, legacy_serialize};
pub use domain::errors::{SigningError, ValidationError};
pub use domain::hash::{canonical_message, compute_hash};
pub use domain::validator::{is_valid_response, validate_response};
pub use ports::inbound::RequestSigningApi;
pub use ports::outbound::{Clock, NonceSource};
pub use service::RequestSigner;
