//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::derivation::DerivationInputs;

pub use acn_01_request_signing::{Clock, NonceSource};

/// Supplies the inputs for one environment's derived key.
///
/// Implemented by whatever holds subscription data (salt, account key) and
/// the search environment list.
pub trait DerivationSource: Send + Sync {
    /// Inputs for `env`, or `None` when the environment is unknown.
    fn inputs_for(&self, env: &str) -> Option<DerivationInputs>;
}
