//! Remote endpoints.

/// Calls the network service accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Subscription lookup.
    Subscription,
    /// Password hashing parameters for an email address.
    CommunicationSettings,
    /// Identifier and key for an email/password pair.
    SubscriptionCredentials,
    /// SPI definition for a connector version.
    SpiDefinition(String),
    /// SPI data submission.
    SpiSubmit,
    /// Environments available as migration targets.
    MigrationEnvironments,
    /// Migration completion callback.
    MigrationComplete,
}

impl Endpoint {
    /// Path relative to the server URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Subscription => "agent-api/subscription".to_string(),
            Endpoint::CommunicationSettings => "agent-api/subscription/communication".to_string(),
            Endpoint::SubscriptionCredentials => "agent-api/subscription/credentials".to_string(),
            Endpoint::SpiDefinition(version) => format!("spi_def/get/{version}"),
            Endpoint::SpiSubmit => "spi-api/site".to_string(),
            Endpoint::MigrationEnvironments => {
                "agent-migrate-api/subscription/migration/environments".to_string()
            }
            Endpoint::MigrationComplete => {
                "agent-migrate-api/subscription/migration/complete".to_string()
            }
        }
    }

    /// Full URL against `server_url`.
    pub fn url(&self, server_url: &str) -> String {
        format!("{}/{}", server_url.trim_end_matches('/'), self.path())
    }

    /// Recognize an endpoint from a request path (leading `/` optional).
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/');
        let endpoint = match path {
            "agent-api/subscription" => Endpoint::Subscription,
            "agent-api/subscription/communication" => Endpoint::CommunicationSettings,
            "agent-api/subscription/credentials" => Endpoint::SubscriptionCredentials,
            "spi-api/site" => Endpoint::SpiSubmit,
            "agent-migrate-api/subscription/migration/environments" => {
                Endpoint::MigrationEnvironments
            }
            "agent-migrate-api/subscription/migration/complete" => Endpoint::MigrationComplete,
            other => {
                let version = other.strip_prefix("spi_def/get/")?;
                if version.is_empty() || version.contains('/') {
                    return None;
                }
                Endpoint::SpiDefinition(version.to_string())
            }
        };
        Some(endpoint)
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Subscription => "subscription",
            Endpoint::CommunicationSettings => "communication",
            Endpoint::SubscriptionCredentials => "credentials",
            Endpoint::SpiDefinition(_) => "spi_definition",
            Endpoint::SpiSubmit => "spi_submit",
            Endpoint::MigrationEnvironments => "migration_environments",
            Endpoint::MigrationComplete => "migration_complete",
        }
    }
}
