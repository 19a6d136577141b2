//! # Shared Types Crate
//!
//! This crate contains the wire types exchanged with the Acquia Network
//! service and the primitives used to enforce replay protection on the
//! receiving side.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the `Authenticator` and `SignedEnvelope`
//!   shapes are defined once and shared by signer, validator and client.
//! - **Identifier in the clear**: `Authenticator::identifier` lets the receiver
//!   select the key; it is never part of the hashed parameters.
//! - **Explicit versions**: the canonicalization scheme is a closed enum
//!   (`RpcVersion`) inferred once, not re-inspected ad hoc.

pub mod envelope;
pub mod errors;
pub mod security;

pub use envelope::{Authenticator, Params, RpcVersion, SignedEnvelope, RPC_VERSION_FIELD};
pub use errors::{ErrorCode, ErrorEnvelope};
pub use security::{
    current_timestamp, validate_timestamp, KeyProvider, NonceCache, TimeWindowError,
};
