//! Subscription lookups through the network client.

use crate::ports::outbound::SubscriptionGateway;
use acn_03_network_client::{Credentials, NetworkApi, NetworkError};
use shared_types::Params;

/// `SubscriptionGateway` over any `NetworkApi`.
pub struct NetworkGateway<A: NetworkApi> {
    api: A,
}

impl<A: NetworkApi> NetworkGateway<A> {
    /// Wrap a network client.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The wrapped client.
    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait::async_trait]
impl<A: NetworkApi> SubscriptionGateway for NetworkGateway<A> {
    async fn fetch_subscription(&self, credentials: &Credentials) -> Result<Params, NetworkError> {
        self.api.get_subscription(credentials, Params::new()).await
    }
}
