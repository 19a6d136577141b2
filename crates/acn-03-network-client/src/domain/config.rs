//! Client configuration.

use shared_crypto::SecretKey;
use shared_types::RpcVersion;
use std::time::Duration;

/// Default Acquia Network endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://rpc.acquia.com";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Network client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; endpoint paths are appended to it.
    pub server_url: String,
    /// Per-call timeout enforced by the transport.
    pub timeout: Duration,
    /// Scheme written into request bodies that do not set one.
    pub rpc_version: RpcVersion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rpc_version: RpcVersion::V2,
        }
    }
}

impl ClientConfig {
    /// Configuration for `server_url` with default timeout and scheme.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Account identifier and shared secret.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Public identifier, sent in the clear.
    pub identifier: String,
    /// Shared secret.
    pub key: SecretKey,
}

impl Credentials {
    /// Bundle an identifier and key.
    pub fn new(identifier: impl Into<String>, key: SecretKey) -> Self {
        Self {
            identifier: identifier.into(),
            key,
        }
    }

    /// True when either half is missing.
    pub fn is_incomplete(&self) -> bool {
        self.identifier.is_empty() || self.key.is_empty()
    }
}
