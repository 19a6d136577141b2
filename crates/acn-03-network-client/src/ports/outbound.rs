//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::TransportError;
use serde::{Deserialize, Serialize};
use shared_crypto::SecretKey;

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as `(name, value)` pairs.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends bytes over HTTP.
///
/// Timeouts are the transport's responsibility; a timed-out call surfaces
/// as `TransportError` and nothing is validated.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `body` to `url`.
    ///
    /// # Errors
    /// * `TransportError` - no response was received
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError>;
}

/// Password hashing parameters returned by the communication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationSettings {
    /// Hash algorithm name.
    pub algorithm: String,
    /// Setting string (algorithm, iteration count and salt).
    pub hash_setting: String,
    /// Whether the password is MD5-hashed before crypting.
    #[serde(default)]
    pub extra_md5: bool,
}

/// Turns an account password into the key used for the credentials call.
pub trait PasswordCrypt: Send + Sync {
    /// Crypt `password` according to `settings`.
    ///
    /// Returns `None` if the settings name an unsupported algorithm.
    fn crypt(&self, password: &str, settings: &CommunicationSettings) -> Option<SecretKey>;
}

#[async_trait::async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, headers, body).await
    }
}
