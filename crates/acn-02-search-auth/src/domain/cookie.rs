//! # Search Cookie
//!
//! Authenticator for search requests, carried in the `Cookie` header:
//!
//! ```text
//! acquia_solr_time=<t>; acquia_solr_nonce=<n>; acquia_solr_hmac=<hmac>;
//! hmac = hex(HMAC-SHA1(derived_key, t ‖ n ‖ signed_string))
//! ```
//!
//! `signed_string` is the POST body, or the path and query for GET.

use shared_crypto::{encode_hex, hmac_sha1, SecretKey};

/// Cookie name carrying the request time.
pub const TIME_COOKIE: &str = "acquia_solr_time";
/// Cookie name carrying the request nonce.
pub const NONCE_COOKIE: &str = "acquia_solr_nonce";
/// Cookie name carrying the request HMAC.
pub const HMAC_COOKIE: &str = "acquia_solr_hmac";

/// Query parameter identifying one search request.
pub const REQUEST_ID_PARAM: &str = "request_id";

/// HMAC over `time ‖ nonce ‖ signed`, lowercase hex.
pub fn search_hmac(derived_key: &SecretKey, time: u64, nonce: &str, signed: &str) -> String {
    let message = format!("{time}{nonce}{signed}");
    encode_hex(&hmac_sha1(derived_key.as_bytes(), message.as_bytes()))
}

/// Render the full `Cookie` header value.
pub fn build_cookie(derived_key: &SecretKey, time: u64, nonce: &str, signed: &str) -> String {
    let hmac = search_hmac(derived_key, time, nonce, signed);
    format!("{TIME_COOKIE}={time}; {NONCE_COOKIE}={nonce}; {HMAC_COOKIE}={hmac};")
}

/// Append `request_id=<id>` to a path that may already carry a query.
pub fn with_request_id(path_and_query: &str, request_id: &str) -> String {
    let separator = if path_and_query.contains('?') { '&' } else { '?' };
    format!("{path_and_query}{separator}{REQUEST_ID_PARAM}={request_id}")
}
