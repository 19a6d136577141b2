//! # Connector Configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ACN_IDENTIFIER` | `credentials.identifier` |
//! | `ACN_KEY` | `credentials.key` |
//! | `ACN_SERVER_URL` | `network.server_url` |
//!
//! ```toml
//! [network]
//! server_url = "https://rpc.acquia.com"
//! timeout = "30s"
//!
//! [credentials]
//! identifier = "ABCD-12345"
//! key = "..."
//!
//! [subscription]
//! refresh_interval = "24h"
//!
//! [search]
//! derived_key_salt = "..."
//!
//! [[search.environments]]
//! id = "prod"
//! index_identifier = "ABCD-12345"
//! ```

use acn_03_network_client::{ClientConfig, Credentials, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
use acn_04_subscription::DEFAULT_REFRESH_INTERVAL;
use serde::{Deserialize, Serialize};
use shared_crypto::SecretKey;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Server URL is empty.
    #[error("network.server_url cannot be empty")]
    EmptyServerUrl,

    /// Refresh interval is zero.
    #[error("subscription.refresh_interval cannot be 0")]
    ZeroRefreshInterval,
}

/// Full connector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Remote service settings.
    pub network: NetworkSection,
    /// Account credentials.
    pub credentials: CredentialsSection,
    /// Subscription cache settings.
    pub subscription: SubscriptionSection,
    /// Search environments.
    pub search: SearchSection,
}

/// `[network]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Base URL of the network service.
    pub server_url: String,
    /// Per-call timeout.
    #[serde(with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `[credentials]`
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsSection {
    /// Account identifier.
    pub identifier: Option<String>,
    /// Account key.
    pub key: Option<String>,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("identifier", &self.identifier)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `[subscription]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSection {
    /// Time between subscription checks.
    #[serde(with = "duration_serde")]
    pub refresh_interval: Duration,
}

impl Default for SubscriptionSection {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// `[search]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Salt used when the subscription record does not carry one.
    pub derived_key_salt: Option<String>,
    /// Search environments.
    pub environments: Vec<SearchEnvironment>,
}

/// One search environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEnvironment {
    /// Local name, e.g. `prod`.
    pub id: String,
    /// Search index identifier.
    pub index_identifier: String,
}

impl ConnectorConfig {
    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `ACN_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply `ACN_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(identifier) = lookup("ACN_IDENTIFIER") {
            self.credentials.identifier = Some(identifier);
        }
        if let Some(key) = lookup("ACN_KEY") {
            self.credentials.key = Some(key);
        }
        if let Some(url) = lookup("ACN_SERVER_URL") {
            self.network.server_url = url;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.server_url.trim().is_empty() {
            return Err(ConfigError::EmptyServerUrl);
        }
        if self.subscription.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    /// Network client configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.network.server_url.clone()).with_timeout(self.network.timeout)
    }

    /// Credentials, empty where unset.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.credentials.identifier.clone().unwrap_or_default(),
            SecretKey::from(self.credentials.key.clone().unwrap_or_default()),
        )
    }
}

/// Durations as `"500ms"`, `"30s"`, `"5m"`, `"24h"` or plain seconds.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            parse_count(ms, "invalid milliseconds").map(Duration::from_millis)
        } else if let Some(secs) = s.strip_suffix('s') {
            parse_scaled(secs, 1, "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            parse_scaled(mins, 60, "invalid minutes")
        } else if let Some(hours) = s.strip_suffix('h') {
            parse_scaled(hours, 60 * 60, "invalid hours")
        } else {
            parse_scaled(s, 1, "invalid duration format")
        }
    }

    fn parse_count(s: &str, invalid: &'static str) -> Result<u64, &'static str> {
        s.trim().parse::<u64>().map_err(|_| invalid)
    }

    fn parse_scaled(s: &str, secs_per_unit: u64, invalid: &'static str) -> Result<Duration, &'static str> {
        parse_count(s, invalid)?
            .checked_mul(secs_per_unit)
            .map(Duration::from_secs)
            .ok_or("duration out of range")
    }
}
