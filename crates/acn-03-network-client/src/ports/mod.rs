//! # Ports Layer
//!
//! - **Inbound (Driving)**: `NetworkApi`, used by the subscription tracker
//!   and the runtime
//! - **Outbound (Driven)**: `HttpTransport` and `PasswordCrypt`

pub mod inbound;
pub mod outbound;
