//! # Subscription Flows
//!
//! Tracker → NetworkGateway → NetworkClient → LoopbackNetwork.
//!
//! ## Flows Tested
//!
//! 1. Expired (1200) survives a later 503 as the last known state
//! 2. Recovery from an outage back to Active
//! 3. Refused credentials end in Rejected, not Unreachable
//! 4. Tampered responses never reach the cache

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use acn_01_request_signing::{FixedClock, RequestSigner, SequenceNonce};
    use acn_03_network_client::{
        AccountBehavior, ClientConfig, Credentials, LoopbackNetwork, NetworkClient,
        EXPIRED_IDENTIFIER, LOOPBACK_URL, TEST_IDENTIFIER, TEST_KEY,
    };
    use acn_04_subscription::{
        NetworkGateway, SubscriptionApi, SubscriptionState, SubscriptionTracker,
    };
    use shared_crypto::SecretKey;
    use shared_types::ErrorCode;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_000_000_000;
    const DAY: u64 = 24 * 60 * 60;

    type Client = NetworkClient<Arc<LoopbackNetwork>, RequestSigner<Arc<FixedClock>, SequenceNonce>>;
    type Tracker = SubscriptionTracker<NetworkGateway<Client>, Arc<FixedClock>>;

    /// Client and loopback share one clock so the refresh interval and the
    /// server's time window move together.
    fn setup(identifier: &str) -> (Tracker, Arc<LoopbackNetwork>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(NOW));
        let network = Arc::new(LoopbackNetwork::with_test_accounts(clock.clone()));
        let client = NetworkClient::new(
            ClientConfig::new(LOOPBACK_URL),
            network.clone(),
            RequestSigner::new(clock.clone(), SequenceNonce::new("sub")),
        );
        let tracker = SubscriptionTracker::new(
            NetworkGateway::new(client),
            clock.clone(),
            Duration::from_secs(DAY),
        );
        tracker.configure(Credentials::new(identifier, SecretKey::from(TEST_KEY)));
        (tracker, network, clock)
    }

    fn last_known(state: &SubscriptionState) -> Option<&SubscriptionState> {
        match state {
            SubscriptionState::Unreachable { last_known, .. } => Some(last_known),
            _ => None,
        }
    }

    // =============================================================================
    // EXPIRED SURVIVES OUTAGES
    // =============================================================================

    #[tokio::test]
    async fn test_expired_is_kept_across_unavailable_service() {
        let (tracker, network, clock) = setup(EXPIRED_IDENTIFIER);
        assert_eq!(tracker.state(), SubscriptionState::Unverified);

        let state = tracker.refresh_if_due().await;
        assert!(matches!(state, SubscriptionState::Expired { .. }), "{state}");

        network.set_behavior(EXPIRED_IDENTIFIER, AccountBehavior::Unavailable);
        clock.advance(DAY);
        let state = tracker.refresh_if_due().await;
        assert!(
            matches!(last_known(&state), Some(SubscriptionState::Expired { .. })),
            "{state}"
        );
        assert!(!tracker.is_active());

        // A second outage does not nest
        let state = tracker.force_refresh().await;
        assert!(
            matches!(last_known(&state), Some(SubscriptionState::Expired { .. })),
            "{state}"
        );

        network.set_behavior(EXPIRED_IDENTIFIER, AccountBehavior::Expired);
        let state = tracker.force_refresh().await;
        assert!(matches!(state, SubscriptionState::Expired { .. }), "{state}");
        assert_ne!(state, SubscriptionState::Unverified);
    }

    #[tokio::test]
    async fn test_active_recovers_after_outage() {
        let (tracker, network, clock) = setup(TEST_IDENTIFIER);
        let state = tracker.refresh_if_due().await;
        assert!(state.is_active());
        let info = state.info().cloned().unwrap();
        assert_eq!(info.derived_key_salt.as_deref(), Some("salt-TEST_AcquiaConnectorTestID"));

        network.set_offline(true);
        let state = tracker.force_refresh().await;
        assert!(matches!(last_known(&state), Some(s) if s.is_active()), "{state}");
        // Last known record still readable
        assert_eq!(state.info(), Some(&info));

        network.set_offline(false);
        clock.advance(DAY);
        let state = tracker.refresh_if_due().await;
        assert!(matches!(state, SubscriptionState::Active { .. }), "{state}");
    }

    // =============================================================================
    // REFUSALS AND TAMPERING
    // =============================================================================

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let (tracker, _, _) = setup(TEST_IDENTIFIER);
        tracker.configure(Credentials::new(TEST_IDENTIFIER, SecretKey::from("wrong key")));

        let state = tracker.force_refresh().await;
        assert_eq!(
            state,
            SubscriptionState::Rejected {
                code: ErrorCode::KeyMismatch
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_subscription_is_rejected() {
        let (tracker, _, _) = setup("TEST_NoSuchSubscription");
        let state = tracker.force_refresh().await;
        assert_eq!(
            state,
            SubscriptionState::Rejected {
                code: ErrorCode::NotFound
            }
        );
    }

    #[tokio::test]
    async fn test_tampered_response_is_not_trusted() {
        let (tracker, network, _) = setup(TEST_IDENTIFIER);
        network.set_tamper_responses(true);

        let state = tracker.force_refresh().await;
        assert!(
            matches!(last_known(&state), Some(SubscriptionState::Unverified)),
            "{state}"
        );
        assert!(state.info().is_none());
    }

    #[tokio::test]
    async fn test_clear_returns_to_unconfigured() {
        let (tracker, network, _) = setup(TEST_IDENTIFIER);
        tracker.refresh_if_due().await;
        tracker.clear();

        assert_eq!(tracker.state(), SubscriptionState::Unconfigured);
        let calls = network.requests();
        tracker.force_refresh().await;
        assert_eq!(network.requests(), calls);
    }
}
