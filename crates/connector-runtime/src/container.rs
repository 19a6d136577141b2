//! # Connector Container
//!
//! Builds every subsystem from one `ConnectorConfig`.
//!
//! ## Wiring
//!
//! ```text
//! RequestSigner ──► NetworkClient ──► NetworkGateway ──► SubscriptionTracker
//!                                                              │ salt
//!                                                              ▼
//!                        StaticDerivationSource ──► SearchAuthenticator
//! ```

use crate::config::ConnectorConfig;
use acn_01_request_signing::{Clock, RandomNonceSource, RequestSigner, SystemClock};
use acn_02_search_auth::{SearchAuthApi, SearchAuthenticator, StaticDerivationSource};
use acn_03_network_client::{HttpTransport, NetworkClient, ReqwestTransport, TransportError};
use acn_04_subscription::{NetworkGateway, SubscriptionApi, SubscriptionTracker};
use shared_crypto::SecretKey;
use std::sync::Arc;
use tracing::{debug, info};

/// Signer used for network calls.
pub type Signer = RequestSigner<Arc<dyn Clock>, RandomNonceSource>;

/// Network client over any transport.
pub type Client = NetworkClient<Arc<dyn HttpTransport>, Signer>;

/// Subscription tracker over the network client.
pub type Tracker = SubscriptionTracker<NetworkGateway<Client>, Arc<dyn Clock>>;

/// Search authenticator.
pub type Search = SearchAuthenticator<StaticDerivationSource, Arc<dyn Clock>, RandomNonceSource>;

/// All subsystems, wired.
pub struct ConnectorContainer {
    /// Loaded configuration.
    pub config: ConnectorConfig,
    /// Request signer for ad-hoc envelopes.
    pub signer: Signer,
    /// Subscription status cache.
    pub tracker: Tracker,
    /// Search request signer.
    pub search: Search,
}

impl ConnectorContainer {
    /// Wire against the real network service.
    pub fn new(config: ConnectorConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.network.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport), Arc::new(SystemClock)))
    }

    /// Wire against an arbitrary transport and clock.
    pub fn with_transport(
        config: ConnectorConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials = config.credentials();

        let client = NetworkClient::new(
            config.client_config(),
            transport,
            RequestSigner::new(clock.clone(), RandomNonceSource),
        );
        let tracker = SubscriptionTracker::new(
            NetworkGateway::new(client),
            clock.clone(),
            config.subscription.refresh_interval,
        );
        tracker.configure(credentials.clone());

        let source = config.search.environments.iter().fold(
            StaticDerivationSource::new(
                config.search.derived_key_salt.clone().unwrap_or_default(),
                credentials.key.clone(),
            ),
            |source, env| source.with_environment(env.id.clone(), env.index_identifier.clone()),
        );
        let search = SearchAuthenticator::new(source, clock.clone(), RandomNonceSource);

        info!(
            server_url = %config.network.server_url,
            environments = config.search.environments.len(),
            "Connector wired"
        );

        Self {
            signer: RequestSigner::new(clock, RandomNonceSource),
            config,
            tracker,
            search,
        }
    }

    /// Account key from configuration.
    pub fn key(&self) -> SecretKey {
        self.config.credentials().key
    }

    /// Take the search salt from the subscription record when it has one.
    ///
    /// Cached derived keys are dropped when the salt changes.
    pub fn sync_search_salt(&self) {
        let Some(salt) = self
            .tracker
            .state()
            .info()
            .and_then(|info| info.derived_key_salt.clone())
        else {
            return;
        };

        let source = self.search.source();
        if source.salt() != salt {
            source.set_salt(salt);
            self.search.clear();
            debug!("Search salt updated from subscription");
        }
    }
}
