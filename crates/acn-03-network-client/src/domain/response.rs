//! Response classification.
//!
//! An error envelope wins over the HTTP status: a 503 carrying
//! `{"error": true, "code": 1200}` is a protocol error, not a server error.

use super::errors::NetworkError;
use crate::ports::outbound::HttpResponse;
use serde_json::Value;
use shared_types::{ErrorEnvelope, SignedEnvelope};

/// Turn a raw response into a signed envelope or a typed error.
///
/// The envelope is not yet validated.
pub fn classify_response(response: &HttpResponse) -> Result<SignedEnvelope, NetworkError> {
    let value: Value = match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(e) => {
            return Err(NetworkError::Server {
                status: response.status,
                reason: format!("malformed JSON: {e}"),
            })
        }
    };

    if let Some(envelope) = ErrorEnvelope::from_value(&value) {
        return Err(NetworkError::Protocol {
            code: envelope.code,
            message: envelope.message,
        });
    }

    if !response.is_success() {
        return Err(NetworkError::Server {
            status: response.status,
            reason: "error status without error envelope".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| NetworkError::Server {
        status: response.status,
        reason: format!("malformed envelope: {e}"),
    })
}
