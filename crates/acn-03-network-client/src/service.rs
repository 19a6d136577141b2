//! # Network Client Service
//!
//! Implements `NetworkApi` over an injected `HttpTransport` and
//! `RequestSigningApi`.
//!
//! ## Call Flow
//!
//! ```text
//! body ──sign──► {body, authenticator} ──POST──► transport
//!                                                   │
//! trusted body ◄──open_response◄──classify_response─┘
//! ```
//!
//! The core never retries. Retry and backoff belong to the caller.

use crate::domain::config::{ClientConfig, Credentials};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::NetworkError;
use crate::domain::response::classify_response;
use crate::ports::inbound::NetworkApi;
use crate::ports::outbound::{CommunicationSettings, HttpTransport, PasswordCrypt};
use acn_01_request_signing::RequestSigningApi;
use serde_json::Value;
use shared_crypto::SecretKey;
use shared_types::{Params, RPC_VERSION_FIELD};
use tracing::{debug, info, warn};

/// Body field carrying the account identifier.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Body field carrying the account email.
pub const EMAIL_FIELD: &str = "email";

const JSON_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// Signed Acquia Network client.
pub struct NetworkClient<T: HttpTransport, S: RequestSigningApi> {
    config: ClientConfig,
    transport: T,
    signer: S,
}

impl<T: HttpTransport, S: RequestSigningApi> NetworkClient<T, S> {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Server URL, timeout and default scheme
    /// * `transport` - Sends the bytes
    /// * `signer` - Builds authenticators and validates responses
    pub fn new(config: ClientConfig, transport: T, signer: S) -> Self {
        Self {
            config,
            transport,
            signer,
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign `body` with `key`, send it to `endpoint` and return the
    /// validated response body.
    ///
    /// The body is sent as given, `identifier` included. The scheme tag is
    /// added when the caller did not set one.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        key: &SecretKey,
        mut body: Params,
    ) -> Result<Params, NetworkError> {
        if !body.contains_key(RPC_VERSION_FIELD) {
            body.insert(
                RPC_VERSION_FIELD.to_string(),
                Value::from(self.config.rpc_version.tag()),
            );
        }

        let request = self.signer.sign(key, body).map_err(|e| {
            warn!(endpoint = endpoint.name(), "Request not signed: {}", e);
            NetworkError::from(e)
        })?;

        let payload = serde_json::to_vec(&request).map_err(|e| {
            warn!(endpoint = endpoint.name(), "Request not encoded: {}", e);
            NetworkError::Encoding(e.to_string())
        })?;

        let url = endpoint.url(&self.config.server_url);
        debug!(endpoint = endpoint.name(), nonce = %request.authenticator.nonce, "Sending signed request");

        let response = self
            .transport
            .post(&url, &JSON_HEADERS, payload)
            .await
            .map_err(|e| {
                warn!(endpoint = endpoint.name(), error = %e, "Transport failure");
                NetworkError::from(e)
            })?;

        let envelope = classify_response(&response).map_err(|e| {
            warn!(endpoint = endpoint.name(), status = response.status, error = %e, "Call failed");
            e
        })?;

        let trusted = self.signer.open_response(key, &request, envelope)?;
        debug!(endpoint = endpoint.name(), "Response validated");
        Ok(trusted)
    }

    fn account_body(credentials: &Credentials, mut extra: Params) -> Params {
        extra.insert(
            IDENTIFIER_FIELD.to_string(),
            Value::String(credentials.identifier.clone()),
        );
        extra
    }
}

#[async_trait::async_trait]
impl<T: HttpTransport, S: RequestSigningApi> NetworkApi for NetworkClient<T, S> {
    async fn get_subscription(
        &self,
        credentials: &Credentials,
        extra: Params,
    ) -> Result<Params, NetworkError> {
        let body = Self::account_body(credentials, extra);
        self.call(&Endpoint::Subscription, &credentials.key, body)
            .await
    }

    async fn get_communication_settings(
        &self,
        email: &str,
    ) -> Result<CommunicationSettings, NetworkError> {
        let mut body = Params::new();
        body.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));

        let response = self
            .call(&Endpoint::CommunicationSettings, &SecretKey::from(email), body)
            .await?;
        serde_json::from_value(Value::Object(response))
            .map_err(|e| NetworkError::InvalidBody(format!("communication settings: {e}")))
    }

    async fn get_subscription_credentials(
        &self,
        email: &str,
        password: &str,
        crypt: &dyn PasswordCrypt,
    ) -> Result<Credentials, NetworkError> {
        let settings = self.get_communication_settings(email).await?;
        let key = crypt.crypt(password, &settings).ok_or_else(|| {
            NetworkError::InvalidBody(format!("unsupported hash algorithm {}", settings.algorithm))
        })?;

        let mut body = Params::new();
        body.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));
        let response = self
            .call(&Endpoint::SubscriptionCredentials, &key, body)
            .await?;

        let field = |name: &str| {
            response
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| NetworkError::InvalidBody(format!("credentials: missing {name}")))
        };
        let identifier = field("identifier")?;
        let key = field("key")?;

        info!(identifier = %identifier, "Retrieved subscription credentials");
        Ok(Credentials::new(identifier, SecretKey::from(key)))
    }

    async fn get_spi_definition(
        &self,
        credentials: &Credentials,
        version: &str,
    ) -> Result<Params, NetworkError> {
        let body = Self::account_body(credentials, Params::new());
        self.call(
            &Endpoint::SpiDefinition(version.to_string()),
            &credentials.key,
            body,
        )
        .await
    }

    async fn send_spi(
        &self,
        credentials: &Credentials,
        spi: Params,
    ) -> Result<Params, NetworkError> {
        let body = Self::account_body(credentials, spi);
        self.call(&Endpoint::SpiSubmit, &credentials.key, body).await
    }

    async fn list_migration_environments(
        &self,
        credentials: &Credentials,
    ) -> Result<Params, NetworkError> {
        let body = Self::account_body(credentials, Params::new());
        self.call(&Endpoint::MigrationEnvironments, &credentials.key, body)
            .await
    }

    async fn complete_migration(
        &self,
        credentials: &Credentials,
        migration: Params,
    ) -> Result<Params, NetworkError> {
        let body = Self::account_body(credentials, migration);
        self.call(&Endpoint::MigrationComplete, &credentials.key, body)
            .await
    }
}
