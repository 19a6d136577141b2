//! # Response Digest
//!
//! Search responses prove authenticity with a `Pragma` header:
//! `Pragma: hmac_digest=<hex>;` where
//! `<hex> = HMAC-SHA1(derived_key, nonce ‖ response_body)`.

use super::errors::SearchAuthError;
use shared_crypto::{decode_hex, verify_hmac_sha1, SecretKey};

/// Header carrying the response digest.
pub const PRAGMA_HEADER: &str = "pragma";

const DIGEST_KEY: &str = "hmac_digest=";

/// Find the `Pragma` value among response headers (case-insensitive name).
pub fn find_pragma<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(PRAGMA_HEADER))
        .map(|(_, value)| value)
}

/// Pull the digest out of a `Pragma` value.
///
/// The key matches case-insensitively and the value must be terminated by
/// `;`. Returns `None` when no well-formed digest is present.
pub fn extract_digest(pragma: &str) -> Option<&str> {
    let lower = pragma.to_ascii_lowercase();
    let start = lower.find(DIGEST_KEY)? + DIGEST_KEY.len();
    let len = pragma[start..].find(';')?;
    let digest = pragma[start..start + len].trim();
    if digest.is_empty() {
        return None;
    }
    Some(digest)
}

/// Check a response against the nonce of the request it answers.
///
/// # Errors
/// * `MissingPragma` - no digest header
/// * `MalformedPragma` - header present but no `hmac_digest=<v>;`
/// * `DigestMismatch` - digest does not match the body
pub fn verify_digest(
    derived_key: &SecretKey,
    nonce: &str,
    pragma: Option<&str>,
    body: &[u8],
) -> Result<(), SearchAuthError> {
    let pragma = pragma.ok_or(SearchAuthError::MissingPragma)?;
    let digest = extract_digest(pragma).ok_or(SearchAuthError::MalformedPragma)?;
    let tag = decode_hex(digest).map_err(|_| SearchAuthError::DigestMismatch)?;

    let mut message = Vec::with_capacity(nonce.len() + body.len());
    message.extend_from_slice(nonce.as_bytes());
    message.extend_from_slice(body);

    if verify_hmac_sha1(derived_key.as_bytes(), &message, &tag) {
        Ok(())
    } else {
        Err(SearchAuthError::DigestMismatch)
    }
}
