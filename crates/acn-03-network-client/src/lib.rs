//! # Network Client Subsystem (ACN-03)
//!
//! Signed calls to the Acquia Network API.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): endpoints, `ClientConfig`, `NetworkError`,
//!   response classification
//! - **Ports Layer** (`ports/`): `NetworkApi` (inbound), `HttpTransport` and
//!   `PasswordCrypt` (outbound)
//! - **Adapters Layer** (`adapters/`): reqwest transport, loopback service,
//!   salted SHA-1 crypt
//! - **Service Layer** (`service.rs`): `NetworkClient`
//!
//! ## Error Taxonomy
//!
//! A call ends in exactly one of: a validated body, `Transport`, `Server`,
//! `Protocol`, `Authentication` or `Signing`. An unvalidated body is never
//! returned.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::crypt::SaltedSha1Crypt;
pub use adapters::http::ReqwestTransport;
pub use adapters::loopback::{
    AccountBehavior, LoopbackNetwork, EXPIRED_IDENTIFIER, LOOPBACK_URL, PROVISION_ERROR_IDENTIFIER,
    TEST_EMAIL, TEST_HASH_SETTING, TEST_IDENTIFIER, TEST_KEY, TEST_PASSWORD, UNAVAILABLE_IDENTIFIER,
};
pub use domain::config::{ClientConfig, Credentials, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
pub use domain::endpoint::Endpoint;
pub use domain::errors::{NetworkError, TransportError};
pub use domain::response::classify_response;
pub use ports::inbound::NetworkApi;
pub use ports::outbound::{CommunicationSettings, HttpResponse, HttpTransport, PasswordCrypt};
pub use service::NetworkClient;
