//! # Outbound Ports (Driven Ports / SPI)

use acn_03_network_client::{Credentials, NetworkError};
use shared_types::Params;

pub use acn_01_request_signing::Clock;

/// Performs the signed subscription lookup.
#[async_trait::async_trait]
pub trait SubscriptionGateway: Send + Sync {
    /// Fetch and validate the subscription record for `credentials`.
    ///
    /// # Errors
    /// * `NetworkError` - any failure; the tracker decides the state
    async fn fetch_subscription(&self, credentials: &Credentials) -> Result<Params, NetworkError>;
}
