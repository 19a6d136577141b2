//! # Adapters Layer
//!
//! - `http`: reqwest-backed transport
//! - `loopback`: in-process stand-in for the remote service
//! - `crypt`: salted SHA-1 password digest understood by the loopback service

pub mod crypt;
pub mod http;
pub mod loopback;
