//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::SearchAuthError;

/// Outbound search request, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Query carried in the URL. The path and query are signed.
    Get {
        /// Path and query, e.g. `/solr/ABCD-1/select?q=x`.
        path_and_query: String,
    },
    /// Query carried in the body. The body is signed.
    Post {
        /// Path and query of the endpoint.
        path_and_query: String,
        /// Request body.
        body: String,
    },
}

impl SearchRequest {
    /// Path and query of the request.
    pub fn path_and_query(&self) -> &str {
        match self {
            SearchRequest::Get { path_and_query } | SearchRequest::Post { path_and_query, .. } => {
                path_and_query
            }
        }
    }
}

/// A request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSearchRequest {
    /// Path and query including the `request_id` parameter.
    pub path_and_query: String,
    /// Request body for POST requests.
    pub body: Option<String>,
    /// `Cookie` header value.
    pub cookie: String,
    /// Nonce to validate the paired response against.
    pub nonce: String,
    /// Value of the `request_id` parameter.
    pub request_id: String,
}

/// Primary Search Authentication API.
pub trait SearchAuthApi: Send + Sync {
    /// Sign a request for environment `env`.
    ///
    /// # Errors
    /// * `MissingDerivedKey` - the environment has no usable key
    fn sign_request(
        &self,
        env: &str,
        request: SearchRequest,
    ) -> Result<SignedSearchRequest, SearchAuthError>;

    /// Validate a response given the nonce of its request and its `Pragma`
    /// header value.
    fn validate_response(
        &self,
        env: &str,
        nonce: &str,
        pragma: Option<&str>,
        body: &[u8],
    ) -> Result<(), SearchAuthError>;

    /// Drop the cached key for one environment.
    fn invalidate(&self, env: &str);

    /// Drop every cached key (salt or account key changed).
    fn clear(&self);
}
