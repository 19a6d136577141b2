//! # Subscription Subsystem (ACN-04)
//!
//! Tracks whether the configured credentials belong to an active
//! subscription, without calling the network on every read.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `SubscriptionState` and its transitions,
//!   `SubscriptionInfo`
//! - **Ports Layer** (`ports/`): `SubscriptionApi` (inbound),
//!   `SubscriptionGateway` and `Clock` (outbound)
//! - **Adapters Layer** (`adapters/`): gateway over the network client
//! - **Service Layer** (`service.rs`): `SubscriptionTracker`
//!
//! ## Outcome Mapping
//!
//! | Outcome | Next state |
//! |---------|------------|
//! | validated body, `active` true | `Active` |
//! | validated body, `active` false | `Expired` |
//! | code 1200 | `Expired` |
//! | code 1000, 1100, 1400 | `Rejected` |
//! | anything else | `Unreachable`, last known state kept |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::network::NetworkGateway;
pub use domain::info::SubscriptionInfo;
pub use domain::state::SubscriptionState;
pub use ports::inbound::SubscriptionApi;
pub use ports::outbound::SubscriptionGateway;
pub use service::{SubscriptionTracker, DEFAULT_REFRESH_INTERVAL};
