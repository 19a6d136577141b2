//! # Concurrent Calls
//!
//! Each in-flight request carries its own authenticator and its response is
//! validated against exactly that one. Responses are produced by the
//! loopback service, so they are genuine signed envelopes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use acn_01_request_signing::{
        FixedClock, RequestSigner, RequestSigningApi, SequenceNonce, ValidationError,
    };
    use acn_03_network_client::{
        classify_response, ClientConfig, Credentials, Endpoint, HttpTransport, LoopbackNetwork,
        NetworkApi, NetworkClient, LOOPBACK_URL, TEST_IDENTIFIER, TEST_KEY,
    };
    use serde_json::{json, Value};
    use shared_crypto::SecretKey;
    use shared_types::{Params, SignedEnvelope};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_000_000_000;

    fn key() -> SecretKey {
        SecretKey::from(TEST_KEY)
    }

    fn body() -> Params {
        match json!({"identifier": TEST_IDENTIFIER, "rpc_version": 2}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    /// Send an already signed request straight through the transport and
    /// return the unvalidated response envelope.
    async fn exchange(network: &LoopbackNetwork, request: &SignedEnvelope) -> SignedEnvelope {
        let payload = serde_json::to_vec(request).unwrap();
        let url = Endpoint::Subscription.url(LOOPBACK_URL);
        let response = network.post(&url, &[], payload).await.unwrap();
        classify_response(&response).unwrap()
    }

    // =============================================================================
    // PER-CALL AUTHENTICATORS
    // =============================================================================

    #[tokio::test]
    async fn test_responses_validate_only_against_their_own_request() {
        let clock = Arc::new(FixedClock::new(NOW));
        let network = LoopbackNetwork::with_test_accounts(clock.clone());
        let signer = RequestSigner::new(clock, SequenceNonce::new("call"));

        let request_a = signer.sign(&key(), body()).unwrap();
        let request_b = signer.sign(&key(), body()).unwrap();
        assert_ne!(request_a.authenticator.nonce, request_b.authenticator.nonce);

        let (response_a, response_b) =
            futures::join!(exchange(&network, &request_a), exchange(&network, &request_b));

        signer
            .validate_response(&key(), &response_a, &request_a.authenticator)
            .unwrap();
        signer
            .validate_response(&key(), &response_b, &request_b.authenticator)
            .unwrap();

        assert_eq!(
            signer.validate_response(&key(), &response_a, &request_b.authenticator),
            Err(ValidationError::NonceMismatch)
        );
        assert_eq!(
            signer.validate_response(&key(), &response_b, &request_a.authenticator),
            Err(ValidationError::NonceMismatch)
        );
    }

    #[tokio::test]
    async fn test_swapped_nonce_fails_before_hash() {
        let clock = Arc::new(FixedClock::new(NOW));
        let network = LoopbackNetwork::with_test_accounts(clock.clone());
        let signer = RequestSigner::new(clock, SequenceNonce::new("swap"));

        let request_a = signer.sign(&key(), body()).unwrap();
        let request_b = signer.sign(&key(), body()).unwrap();
        let mut response = exchange(&network, &request_a).await;

        // Re-label A's response with B's nonce. The hash is now wrong too,
        // but the nonce check is reported.
        response.authenticator.nonce = request_b.authenticator.nonce.clone();
        assert_eq!(
            signer.validate_response(&key(), &response, &request_a.authenticator),
            Err(ValidationError::NonceMismatch)
        );
        assert_eq!(
            signer.validate_response(&key(), &response, &request_b.authenticator),
            Err(ValidationError::HashMismatch)
        );
    }

    #[tokio::test]
    async fn test_many_concurrent_client_calls() {
        let clock = Arc::new(FixedClock::new(NOW));
        let network = Arc::new(LoopbackNetwork::with_test_accounts(clock.clone()));
        let client = Arc::new(NetworkClient::new(
            ClientConfig::new(LOOPBACK_URL),
            network.clone(),
            RequestSigner::new(clock, SequenceNonce::new("many")),
        ));
        let credentials = Credentials::new(TEST_IDENTIFIER, key());

        let mut handles = Vec::new();
        for i in 0..16 {
            let client = client.clone();
            let credentials = credentials.clone();
            handles.push(tokio::spawn(async move {
                let mut extra = Params::new();
                extra.insert("call".to_string(), Value::from(i));
                client.get_subscription(&credentials, extra).await
            }));
        }

        for handle in handles {
            let body = handle.await.unwrap().unwrap();
            assert_eq!(body["active"], Value::Bool(true));
        }
        assert_eq!(network.requests(), 16);
    }
}
