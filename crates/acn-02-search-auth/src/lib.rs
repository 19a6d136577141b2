//! # Search Authentication Subsystem (ACN-02)
//!
//! Signs Acquia Search requests with a per-environment derived key and
//! validates the `Pragma` digest on the paired responses.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): key derivation, cookie and digest rules
//! - **Ports Layer** (`ports/`): `SearchAuthApi` (inbound), `DerivationSource`
//!   plus the shared `Clock`/`NonceSource` (outbound)
//! - **Adapters Layer** (`adapters/`): in-memory derivation source
//! - **Service Layer** (`service.rs`): `SearchAuthenticator` with the key cache
//!
//! ## Protocol
//!
//! ```text
//! Request:  Cookie: acquia_solr_time=<t>; acquia_solr_nonce=<n>; acquia_solr_hmac=<h>;
//!           h = HMAC-SHA1(derived, t ‖ n ‖ (body | path?query&request_id=<uuid>))
//! Response: Pragma: hmac_digest=<d>;
//!           d = HMAC-SHA1(derived, n ‖ response_body)
//! ```
//!
//! ## Security Notes
//!
//! - The account key never signs search traffic; only the derived key does
//! - Missing salt, identifier or account key means no key and no request

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::static_source::StaticDerivationSource;
pub use domain::cookie::{build_cookie, search_hmac, with_request_id};
pub use domain::derivation::{derive_key, DerivationInputs};
pub use domain::errors::SearchAuthError;
pub use domain::pragma::{extract_digest, find_pragma, verify_digest};
pub use ports::inbound::{SearchAuthApi, SearchRequest, SignedSearchRequest};
pub use ports::outbound::DerivationSource;
pub use service::SearchAuthenticator;
