//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that network clients use
//! - **Outbound (Driven)**: clock and randomness this subsystem needs

pub mod inbound;
pub mod outbound;
