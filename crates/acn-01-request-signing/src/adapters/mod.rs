//! # Adapters Module
//!
//! Implementations of the outbound ports.

pub mod fixed;
pub mod system;
