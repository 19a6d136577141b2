//! # Inbound Ports (Driving Ports / API)

use crate::domain::state::SubscriptionState;
use acn_03_network_client::Credentials;

/// Subscription status API.
///
/// Reads are served from the cache. Only `refresh_if_due` and
/// `force_refresh` reach the network.
#[async_trait::async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Current state.
    fn state(&self) -> SubscriptionState;

    /// Unix time of the last completed check, if any.
    fn last_checked(&self) -> Option<u64>;

    /// True when the last known status is active.
    fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Set credentials. Moves to `Unverified`, or `Unconfigured` when the
    /// identifier or key is empty.
    fn configure(&self, credentials: Credentials);

    /// Drop credentials and any cached status.
    fn clear(&self);

    /// Check with the service if the refresh interval has elapsed.
    async fn refresh_if_due(&self) -> SubscriptionState;

    /// Check with the service now.
    async fn force_refresh(&self) -> SubscriptionState;
}
