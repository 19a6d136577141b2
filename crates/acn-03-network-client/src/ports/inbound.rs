//! # Inbound Ports (Driving Ports / API)

use crate::domain::config::Credentials;
use crate::domain::errors::NetworkError;
use crate::ports::outbound::{CommunicationSettings, PasswordCrypt};
use shared_types::Params;

/// Signed calls to the network service.
///
/// Every method signs its own request and validates the response against
/// that request before returning the body.
#[async_trait::async_trait]
pub trait NetworkApi: Send + Sync {
    /// Look up the subscription behind `credentials`.
    ///
    /// `extra` is merged into the request body.
    async fn get_subscription(
        &self,
        credentials: &Credentials,
        extra: Params,
    ) -> Result<Params, NetworkError>;

    /// Password hashing parameters for `email`. Signed with the email as key.
    async fn get_communication_settings(
        &self,
        email: &str,
    ) -> Result<CommunicationSettings, NetworkError>;

    /// Identifier and key for an email/password pair.
    ///
    /// Fetches the communication settings, crypts the password with `crypt`
    /// and signs the credentials call with the result.
    async fn get_subscription_credentials(
        &self,
        email: &str,
        password: &str,
        crypt: &dyn PasswordCrypt,
    ) -> Result<Credentials, NetworkError>;

    /// SPI definition for connector `version`.
    async fn get_spi_definition(
        &self,
        credentials: &Credentials,
        version: &str,
    ) -> Result<Params, NetworkError>;

    /// Submit SPI data. The payload is opaque.
    async fn send_spi(
        &self,
        credentials: &Credentials,
        spi: Params,
    ) -> Result<Params, NetworkError>;

    /// Environments available as migration targets.
    async fn list_migration_environments(
        &self,
        credentials: &Credentials,
    ) -> Result<Params, NetworkError>;

    /// Report a finished migration. The payload is opaque.
    async fn complete_migration(
        &self,
        credentials: &Credentials,
        migration: Params,
    ) -> Result<Params, NetworkError>;
}
