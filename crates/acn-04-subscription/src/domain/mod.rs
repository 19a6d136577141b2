//! # Domain Layer
//!
//! Subscription states and the pure transition function.

pub mod info;
pub mod state;
