//! # Acquia Connector Runtime
//!
//! Library half of the `acquia-connector` binary.
//!
//! ## Modular Structure
//!
//! - `config` - TOML configuration with environment overrides
//! - `container` - Subsystem wiring
//! - `commands` - CLI command implementations
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`RUST_LOG`, default `info`)
//! 2. Load and validate configuration
//! 3. Wire subsystems
//! 4. Run one command and print its output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;
pub mod container;

pub use config::{ConfigError, ConnectorConfig};
pub use container::ConnectorContainer;
