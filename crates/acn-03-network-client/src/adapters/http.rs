//! [`reqwest`]-backed implementation of [`HttpTransport`].

use crate::domain::errors::TransportError;
use crate::ports::outbound::{HttpResponse, HttpTransport};
use std::time::Duration;

/// HTTP transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout.
    ///
    /// # Errors
    /// * `TransportError` - the TLS backend could not be initialized
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("client setup failed: {e}")))?;
        Ok(Self { inner })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.post(url);
        for &(name, value) in headers {
            builder = builder.header(name, value);
        }

        let resp = builder
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status().as_u16();

        let resp_headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers: resp_headers,
            body,
        })
    }
}
