//! # Subscription State Machine
//!
//! ```text
//!                 configure
//! Unconfigured ─────────────► Unverified
//!      ▲                          │ refresh
//!      │ clear (from any)         ▼
//!      │        ┌──────── Active ◄────────┐
//!      │        │            ▲            │
//!      │        ▼            │            │
//!      │     Expired ◄───────┴──────► Rejected
//!      │
//!      │   any settled state ──transient failure──► Unreachable { last_known }
//! ```
//!
//! `Unreachable` never nests: its `last_known` is always a settled state.

use super::info::SubscriptionInfo;
use acn_03_network_client::NetworkError;
use shared_types::{ErrorCode, Params};
use std::fmt;

/// Locally tracked subscription status.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionState {
    /// No identifier or key set.
    Unconfigured,
    /// Credentials set, not yet confirmed remotely.
    Unverified,
    /// Remote service confirmed an active subscription.
    Active {
        /// Reported subscription record.
        info: SubscriptionInfo,
    },
    /// Remote service reported the subscription lapsed.
    Expired {
        /// Record, when the service sent one.
        info: Option<SubscriptionInfo>,
    },
    /// Remote service refused the credentials themselves.
    Rejected {
        /// Refusal code (not found, key mismatch or key not found).
        code: ErrorCode,
    },
    /// Last check failed for a transient reason.
    Unreachable {
        /// State before the failure. Never `Unreachable`.
        last_known: Box<SubscriptionState>,
        /// What went wrong.
        reason: String,
    },
}

impl SubscriptionState {
    /// The settled state: `last_known` for `Unreachable`, otherwise itself.
    pub fn settled(&self) -> &SubscriptionState {
        match self {
            SubscriptionState::Unreachable { last_known, .. } => last_known,
            other => other,
        }
    }

    /// True when the last known status is active, even if stale.
    pub fn is_active(&self) -> bool {
        matches!(self.settled(), SubscriptionState::Active { .. })
    }

    /// Last reported subscription record, if any.
    pub fn info(&self) -> Option<&SubscriptionInfo> {
        match self.settled() {
            SubscriptionState::Active { info } => Some(info),
            SubscriptionState::Expired { info } => info.as_ref(),
            _ => None,
        }
    }

    /// Short name for logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            SubscriptionState::Unconfigured => "unconfigured",
            SubscriptionState::Unverified => "unverified",
            SubscriptionState::Active { .. } => "active",
            SubscriptionState::Expired { .. } => "expired",
            SubscriptionState::Rejected { .. } => "rejected",
            SubscriptionState::Unreachable { .. } => "unreachable",
        }
    }

    /// State after a refresh that ended with `outcome`.
    pub fn after_refresh(&self, outcome: Result<Params, NetworkError>) -> SubscriptionState {
        match outcome {
            Ok(body) => {
                let info = SubscriptionInfo::from_params(&body);
                if info.active {
                    SubscriptionState::Active { info }
                } else {
                    SubscriptionState::Expired { info: Some(info) }
                }
            }
            Err(NetworkError::Protocol {
                code: ErrorCode::Expired,
                ..
            }) => SubscriptionState::Expired {
                info: self.info().cloned(),
            },
            Err(NetworkError::Protocol { code, .. }) if code.is_credential_rejection() => {
                SubscriptionState::Rejected { code }
            }
            Err(e) => SubscriptionState::Unreachable {
                last_known: Box::new(self.settled().clone()),
                reason: e.to_string(),
            },
        }
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionState::Rejected { code } => write!(f, "rejected ({code})"),
            SubscriptionState::Unreachable { last_known, .. } => {
                write!(f, "unreachable (last known: {last_known})")
            }
            other => f.write_str(other.name()),
        }
    }
}
