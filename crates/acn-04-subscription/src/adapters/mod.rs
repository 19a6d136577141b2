//! # Adapters Layer

pub mod network;
