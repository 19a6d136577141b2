//! # Ports Layer
//!
//! - **Inbound (Driving)**: API the search client uses
//! - **Outbound (Driven)**: where derivation inputs come from

pub mod inbound;
pub mod outbound;
