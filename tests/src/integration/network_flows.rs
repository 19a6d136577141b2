//! # Network Flows
//!
//! NetworkClient over the loopback service for every endpoint, plus the
//! server-side refusals a deployed client meets: clock skew, replayed
//! nonces and wrong keys.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use acn_01_request_signing::{
        FixedClock, FixedNonce, NonceSource, RequestSigner, SequenceNonce, ValidationError,
    };
    use acn_03_network_client::{
        ClientConfig, Credentials, LoopbackNetwork, NetworkApi, NetworkClient, NetworkError,
        SaltedSha1Crypt, LOOPBACK_URL, PROVISION_ERROR_IDENTIFIER, TEST_EMAIL, TEST_IDENTIFIER,
        TEST_KEY, TEST_PASSWORD,
    };
    use serde_json::{json, Value};
    use shared_crypto::SecretKey;
    use shared_types::{ErrorCode, Params, RpcVersion};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_000_000_000;

    type Client<N> = NetworkClient<Arc<LoopbackNetwork>, RequestSigner<Arc<FixedClock>, N>>;

    struct Harness<N: NonceSource> {
        client: Client<N>,
        network: Arc<LoopbackNetwork>,
        client_clock: Arc<FixedClock>,
        server_clock: Arc<FixedClock>,
    }

    fn harness_with<N: NonceSource>(nonces: N) -> Harness<N> {
        let client_clock = Arc::new(FixedClock::new(NOW));
        let server_clock = Arc::new(FixedClock::new(NOW));
        let network = Arc::new(LoopbackNetwork::with_test_accounts(server_clock.clone()));
        let client = NetworkClient::new(
            ClientConfig::new(LOOPBACK_URL),
            network.clone(),
            RequestSigner::new(client_clock.clone(), nonces),
        );
        Harness {
            client,
            network,
            client_clock,
            server_clock,
        }
    }

    fn harness() -> Harness<SequenceNonce> {
        harness_with(SequenceNonce::new("net"))
    }

    fn credentials() -> Credentials {
        Credentials::new(TEST_IDENTIFIER, SecretKey::from(TEST_KEY))
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    // =============================================================================
    // ENDPOINTS
    // =============================================================================

    #[tokio::test]
    async fn test_credentials_by_email_then_subscription() {
        let h = harness();
        let found = h
            .client
            .get_subscription_credentials(TEST_EMAIL, TEST_PASSWORD, &SaltedSha1Crypt)
            .await
            .unwrap();
        assert_eq!(found.identifier, TEST_IDENTIFIER);
        assert_eq!(found.key.as_bytes(), TEST_KEY.as_bytes());

        let body = h.client.get_subscription(&found, Params::new()).await.unwrap();
        assert_eq!(body["active"], Value::Bool(true));
        assert_eq!(body["rpc_version"], json!(2));
    }

    #[tokio::test]
    async fn test_wrong_password_is_refused() {
        let h = harness();
        let err = h
            .client
            .get_subscription_credentials(TEST_EMAIL, "not the password", &SaltedSha1Crypt)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Protocol { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_spi_and_migration_endpoints() {
        let h = harness();
        let creds = credentials();

        let definition = h.client.get_spi_definition(&creds, "10.1").await.unwrap();
        assert_eq!(definition["drupal_version"], json!("10.1"));

        h.client
            .send_spi(&creds, params(json!({"modules": [], "php": "8.2"})))
            .await
            .unwrap();
        h.client.list_migration_environments(&creds).await.unwrap();
        h.client
            .complete_migration(&creds, params(json!({"file": "backup.tar.gz"})))
            .await
            .unwrap();

        assert_eq!(h.network.requests(), 4);
    }

    #[tokio::test]
    async fn test_legacy_scheme_round_trip() {
        let mut config = ClientConfig::new(LOOPBACK_URL);
        config.rpc_version = RpcVersion::Legacy;
        let clock = Arc::new(FixedClock::new(NOW));
        let network = Arc::new(LoopbackNetwork::with_test_accounts(clock.clone()));
        let client = NetworkClient::new(
            config,
            network,
            RequestSigner::new(clock, SequenceNonce::new("legacy")),
        );

        let body = client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap();
        assert_eq!(body["rpc_version"], json!(1));
    }

    // =============================================================================
    // SERVER-SIDE REFUSALS
    // =============================================================================

    #[tokio::test]
    async fn test_client_clock_skew() {
        let h = harness();

        h.client_clock.advance(16 * 60);
        let err = h
            .client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MessageFuture));

        h.client_clock.set(NOW - 16 * 60);
        let err = h
            .client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MessageExpired));

        // Inside the window the call goes through
        h.client_clock.set(NOW - 60);
        h.client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_replayed_nonce_is_refused() {
        let h = harness_with(FixedNonce("same-nonce".to_string()));
        h.client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap();

        let err = h
            .client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Replay));
    }

    #[tokio::test]
    async fn test_wrong_key_is_refused() {
        let h = harness();
        let creds = Credentials::new(TEST_IDENTIFIER, SecretKey::from("not the key"));
        let err = h
            .client
            .get_subscription(&creds, Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::KeyMismatch));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_provision_error() {
        let h = harness();
        let creds = Credentials::new(PROVISION_ERROR_IDENTIFIER, SecretKey::from(TEST_KEY));
        let err = h
            .client
            .complete_migration(&creds, Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ProvisionError));
    }

    // =============================================================================
    // CLIENT-SIDE REFUSALS
    // =============================================================================

    #[tokio::test]
    async fn test_tampered_body_is_never_returned() {
        let h = harness();
        h.network.set_tamper_responses(true);
        let err = h
            .client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::Authentication(ValidationError::HashMismatch)
        );
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let h = harness();
        let creds = Credentials::new(TEST_IDENTIFIER, SecretKey::default());
        let err = h
            .client
            .get_subscription(&creds, Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Signing(_)));
        assert_eq!(h.network.requests(), 0);
    }

    #[tokio::test]
    async fn test_offline_is_transport_error() {
        let h = harness();
        h.network.set_offline(true);
        let err = h
            .client
            .get_subscription(&credentials(), Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Transport(_)));
        assert!(err.is_transient());
    }
}
