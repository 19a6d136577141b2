//! Derivation inputs held in memory.

use crate::domain::derivation::DerivationInputs;
use crate::ports::outbound::DerivationSource;
use parking_lot::RwLock;
use shared_crypto::SecretKey;
use std::collections::HashMap;

/// Salt, account key and environment list, replaceable at runtime.
#[derive(Debug, Default)]
pub struct StaticDerivationSource {
    salt: RwLock<String>,
    master_key: RwLock<SecretKey>,
    environments: RwLock<HashMap<String, String>>,
}

impl StaticDerivationSource {
    /// Create with the subscription salt and account key.
    pub fn new(salt: impl Into<String>, master_key: SecretKey) -> Self {
        Self {
            salt: RwLock::new(salt.into()),
            master_key: RwLock::new(master_key),
            environments: RwLock::new(HashMap::new()),
        }
    }

    /// Register environment `env` backed by search index `index_identifier`.
    pub fn with_environment(self, env: impl Into<String>, index_identifier: impl Into<String>) -> Self {
        self.environments
            .write()
            .insert(env.into(), index_identifier.into());
        self
    }

    /// Current salt.
    pub fn salt(&self) -> String {
        self.salt.read().clone()
    }

    /// Replace the salt. Cached derived keys must be cleared by the caller.
    pub fn set_salt(&self, salt: impl Into<String>) {
        *self.salt.write() = salt.into();
    }

    /// Replace the account key. Cached derived keys must be cleared by the caller.
    pub fn set_master_key(&self, key: SecretKey) {
        *self.master_key.write() = key;
    }
}

impl DerivationSource for StaticDerivationSource {
    fn inputs_for(&self, env: &str) -> Option<DerivationInputs> {
        let identifier = self.environments.read().get(env)?.clone();
        Some(DerivationInputs {
            salt: self.salt.read().clone(),
            identifier,
            master_key: self.master_key.read().clone(),
        })
    }
}
