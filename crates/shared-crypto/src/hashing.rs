//! # SHA-1 Message Authentication
//!
//! Two keyed constructions over SHA-1 are in use on the wire:
//!
//! - [`double_sha1`]: the RFC 2104 padding construction computed by hand,
//!   `SHA1((K ^ opad) || SHA1((K ^ ipad) || m))`, with `K` zero-padded to one
//!   64-byte block. Keys longer than a block are **truncated** to 64 bytes, not
//!   hashed. Deployed network servers compute it this way, so it must stay
//!   bit-for-bit identical.
//! - [`hmac_sha1`]: standard HMAC-SHA1 (keys longer than a block are hashed
//!   first). Used by the search integration.
//!
//! For keys of at most 64 bytes the two constructions agree.

use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use zeroize::Zeroize;

/// SHA-1 output (160-bit).
pub type Sha1Digest = [u8; 20];

/// SHA-1 block size in bytes.
pub const BLOCK_SIZE: usize = 64;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

type HmacSha1 = Hmac<Sha1>;

/// Plain SHA-1 of `data`.
pub fn sha1_digest(data: &[u8]) -> Sha1Digest {
    let mut out = [0u8; 20];
    out.copy_from_slice(&Sha1::digest(data));
    out
}

/// RFC 2104 construction with a truncated, zero-padded 64-byte key block.
pub fn double_sha1(key: &[u8], message: &[u8]) -> Sha1Digest {
    let mut block = [0u8; BLOCK_SIZE];
    let len = key.len().min(BLOCK_SIZE);
    block[..len].copy_from_slice(&key[..len]);

    let mut pad = [0u8; BLOCK_SIZE];
    for (p, k) in pad.iter_mut().zip(block.iter()) {
        *p = k ^ IPAD;
    }
    let mut inner = Sha1::new();
    inner.update(pad);
    inner.update(message);
    let inner_digest = inner.finalize();

    for (p, k) in pad.iter_mut().zip(block.iter()) {
        *p = k ^ OPAD;
    }
    let mut outer = Sha1::new();
    outer.update(pad);
    outer.update(inner_digest);

    block.zeroize();
    pad.zeroize();

    let mut out = [0u8; 20];
    out.copy_from_slice(&outer.finalize());
    out
}

/// Standard HMAC-SHA1.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> Sha1Digest {
    let mut mac = match HmacSha1::new_from_slice(key) {
        Ok(m) => m,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(message);
    let mut out = [0u8; 20];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Verifies a standard HMAC-SHA1 tag in constant time.
///
/// # Returns
///
/// - `true` if `tag` is the HMAC-SHA1 of `message` under `key`
/// - `false` otherwise, including on a tag of the wrong length
pub fn verify_hmac_sha1(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    let mut mac = match HmacSha1::new_from_slice(key) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_hmac(key: &[u8], message: &[u8]) -> Sha1Digest {
        let mut mac = HmacSha1::new_from_slice(key).unwrap();
        mac.update(message);
        let mut out = [0u8; 20];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    #[test]
    fn test_sha1_known_vector() {
        assert_eq!(
            hex::encode(sha1_digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_rfc2202_case_2() {
        // RFC 2202 test case 2
        let digest = hmac_sha1(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(digest),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_double_sha1_truncates_long_keys() {
        let long_key = [0xAAu8; 80];
        let truncated = &long_key[..64];

        assert_eq!(
            double_sha1(&long_key, b"message"),
            double_sha1(truncated, b"message")
        );
        // Standard HMAC hashes the long key instead.
        assert_ne!(
            double_sha1(&long_key, b"message"),
            hmac_sha1(&long_key, b"message")
        );
        assert_eq!(
            hmac_sha1(&long_key, b"message"),
            reference_hmac(&long_key, b"message")
        );
    }

    #[test]
    fn test_rfc2202_case_6_long_key() {
        // RFC 2202 test case 6: 80-byte key, hashed before use
        let key = [0xAAu8; 80];
        let digest = hmac_sha1(&key, b"Test Using Larger Than Block-Size Key - Hash Key First");
        assert_eq!(
            hex::encode(digest),
            "aa4ae5e15272d00e95705637ce8a3b55ed402112"
        );
        assert_ne!(
            digest,
            double_sha1(&key, b"Test Using Larger Than Block-Size Key - Hash Key First")
        );
    }

    #[test]
    fn test_verify_hmac_sha1() {
        let tag = hmac_sha1(b"key", b"data");
        assert!(verify_hmac_sha1(b"key", b"data", &tag));
        assert!(!verify_hmac_sha1(b"other", b"data", &tag));
        assert!(!verify_hmac_sha1(b"key", b"data", &tag[..10]));
    }

    proptest! {
        #[test]
        fn prop_short_keys_match_standard_hmac(
            key in proptest::collection::vec(any::<u8>(), 0..=64),
            message in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            prop_assert_eq!(double_sha1(&key, &message), reference_hmac(&key, &message));
        }
    }
}
