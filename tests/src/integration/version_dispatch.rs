//! # Version Dispatch
//!
//! Fixed inputs signed under each `rpc_version`. The scheme changes both the
//! hashed message and the output encoding; the identifier never reaches the
//! hash.

#[cfg(test)]
mod tests {
    use acn_01_request_signing::{
        compute_hash, FixedClock, FixedNonce, RequestSigner, RequestSigningApi,
    };
    use acn_03_network_client::{TEST_IDENTIFIER, TEST_KEY};
    use serde_json::{json, Value};
    use shared_crypto::SecretKey;
    use shared_types::{Params, RpcVersion};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TIME: u64 = 1_000_000_000;
    const NONCE: &str = "abc123";

    fn signer() -> RequestSigner<FixedClock, FixedNonce> {
        RequestSigner::new(FixedClock::new(TIME), FixedNonce(NONCE.to_string()))
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn key() -> SecretKey {
        SecretKey::from(TEST_KEY)
    }

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    // =============================================================================
    // LEGACY VS V2
    // =============================================================================

    #[test]
    fn test_legacy_is_base64_and_v2_is_hex() {
        let legacy = signer()
            .build_authenticator(&key(), params(json!({"identifier": TEST_IDENTIFIER})))
            .unwrap();
        let v2 = signer()
            .build_authenticator(
                &key(),
                params(json!({"identifier": TEST_IDENTIFIER, "rpc_version": 2})),
            )
            .unwrap();

        // 20-byte digest: 28 base64 characters with one pad, or 40 hex
        assert_eq!(legacy.hash.len(), 28);
        assert!(legacy.hash.ends_with('='));
        assert_eq!(v2.hash.len(), 40);
        assert!(is_lower_hex(&v2.hash));
        assert_ne!(legacy.hash, v2.hash);

        for auth in [&legacy, &v2] {
            assert_eq!(auth.time, TIME);
            assert_eq!(auth.nonce, NONCE);
            assert_eq!(auth.identifier.as_deref(), Some(TEST_IDENTIFIER));
        }
    }

    #[test]
    fn test_identifier_does_not_reach_the_hash() {
        let with_id = signer()
            .build_authenticator(&key(), params(json!({"identifier": TEST_IDENTIFIER})))
            .unwrap();
        let expected = compute_hash(&key(), TIME, NONCE, RpcVersion::Legacy, &Params::new());
        assert_eq!(with_id.hash, expected);

        let v2 = signer()
            .build_authenticator(
                &key(),
                params(json!({"identifier": "someone-else", "rpc_version": 2})),
            )
            .unwrap();
        let expected = compute_hash(
            &key(),
            TIME,
            NONCE,
            RpcVersion::V2,
            &params(json!({"rpc_version": 2})),
        );
        assert_eq!(v2.hash, expected);
    }

    #[test]
    fn test_ping_only_ignores_payload() {
        let a = signer()
            .build_authenticator(&key(), params(json!({"rpc_version": 3, "a": 1})))
            .unwrap();
        let b = signer()
            .build_authenticator(&key(), params(json!({"rpc_version": 3, "b": [1, 2]})))
            .unwrap();
        assert_eq!(a.hash, b.hash);
        assert!(is_lower_hex(&a.hash));
    }

    #[test]
    fn test_numeric_string_version_selects_v2() {
        let numeric = signer()
            .build_authenticator(&key(), params(json!({"rpc_version": 2})))
            .unwrap();
        let text = signer()
            .build_authenticator(&key(), params(json!({"rpc_version": "2"})))
            .unwrap();
        // Same scheme, different JSON payload
        assert_eq!(numeric.hash.len(), 40);
        assert_eq!(text.hash.len(), 40);
        assert_ne!(numeric.hash, text.hash);
    }

    #[test]
    fn test_empty_key_never_signs() {
        let result = signer().build_authenticator(&SecretKey::default(), Params::new());
        assert!(result.is_err());
    }
}
