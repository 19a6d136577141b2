//! # Subscription Tracker
//!
//! Caches the subscription state and refreshes it on a caller-driven
//! interval.
//!
//! ## Concurrency
//!
//! - The cached state sits behind a `parking_lot::RwLock`, never held
//!   across an await
//! - Refreshes are serialized by an async mutex; a caller that waited for
//!   another refresh re-checks whether one is still due
//! - A refresh that raced with `configure` or `clear` is discarded

use crate::domain::state::SubscriptionState;
use crate::ports::inbound::SubscriptionApi;
use crate::ports::outbound::{Clock, SubscriptionGateway};
use acn_03_network_client::Credentials;
use parking_lot::RwLock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default time between subscription checks.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Cached {
    credentials: Option<Credentials>,
    state: SubscriptionState,
    last_checked: Option<u64>,
    generation: u64,
}

/// Subscription status cache.
pub struct SubscriptionTracker<G: SubscriptionGateway, C: Clock> {
    gateway: G,
    clock: C,
    refresh_interval: Duration,
    cached: RwLock<Cached>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl<G: SubscriptionGateway, C: Clock> SubscriptionTracker<G, C> {
    /// Create an unconfigured tracker.
    pub fn new(gateway: G, clock: C, refresh_interval: Duration) -> Self {
        Self {
            gateway,
            clock,
            refresh_interval,
            cached: RwLock::new(Cached {
                credentials: None,
                state: SubscriptionState::Unconfigured,
                last_checked: None,
                generation: 0,
            }),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The gateway this tracker calls.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Configured refresh interval.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    fn is_due(&self) -> bool {
        let cached = self.cached.read();
        if cached.credentials.is_none() {
            return false;
        }
        match cached.last_checked {
            None => true,
            Some(last) => {
                self.clock.now().saturating_sub(last) >= self.refresh_interval.as_secs()
            }
        }
    }

    fn transition(cached: &mut Cached, next: SubscriptionState) {
        if cached.state != next {
            info!(from = %cached.state, to = %next, "Subscription state changed");
        }
        cached.state = next;
    }

    async fn refresh(&self) -> SubscriptionState {
        let (credentials, generation) = {
            let cached = self.cached.read();
            match &cached.credentials {
                Some(credentials) => (credentials.clone(), cached.generation),
                None => return cached.state.clone(),
            }
        };

        debug!(identifier = %credentials.identifier, "Checking subscription");
        let outcome = self.gateway.fetch_subscription(&credentials).await;
        if let Err(e) = &outcome {
            warn!(identifier = %credentials.identifier, error = %e, "Subscription check failed");
        }

        let mut cached = self.cached.write();
        if cached.generation != generation {
            debug!("Credentials changed during check; discarding result");
            return cached.state.clone();
        }
        let next = cached.state.after_refresh(outcome);
        Self::transition(&mut cached, next);
        cached.last_checked = Some(self.clock.now());
        cached.state.clone()
    }
}

#[async_trait::async_trait]
impl<G: SubscriptionGateway, C: Clock> SubscriptionApi for SubscriptionTracker<G, C> {
    fn state(&self) -> SubscriptionState {
        self.cached.read().state.clone()
    }

    fn last_checked(&self) -> Option<u64> {
        self.cached.read().last_checked
    }

    fn configure(&self, credentials: Credentials) {
        let mut cached = self.cached.write();
        cached.generation += 1;
        cached.last_checked = None;
        if credentials.is_incomplete() {
            cached.credentials = None;
            Self::transition(&mut cached, SubscriptionState::Unconfigured);
        } else {
            cached.credentials = Some(credentials);
            Self::transition(&mut cached, SubscriptionState::Unverified);
        }
    }

    fn clear(&self) {
        let mut cached = self.cached.write();
        cached.generation += 1;
        cached.credentials = None;
        cached.last_checked = None;
        Self::transition(&mut cached, SubscriptionState::Unconfigured);
    }

    async fn refresh_if_due(&self) -> SubscriptionState {
        if !self.is_due() {
            return self.state();
        }
        let _guard = self.refresh_lock.lock().await;
        if !self.is_due() {
            return self.state();
        }
        self.refresh().await
    }

    async fn force_refresh(&self) -> SubscriptionState {
        let _guard = self.refresh_lock.lock().await;
        self.refresh().await
    }
}
