//! # Ports Layer
//!
//! - **Inbound (Driving)**: `SubscriptionApi`
//! - **Outbound (Driven)**: `SubscriptionGateway` plus the shared `Clock`

pub mod inbound;
pub mod outbound;
