//! # Error Envelope
//!
//! Error shape returned by the network service:
//! `{ "error": true, "code": <int>, "message": <string> }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed enumeration of remote error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ErrorCode {
    /// Subscription not found.
    NotFound,
    /// Identifier/key combination does not match.
    KeyMismatch,
    /// Subscription exists but has lapsed.
    Expired,
    /// Nonce already used.
    Replay,
    /// No key on file for the identifier.
    KeyNotFound,
    /// Authenticator time is ahead of the server clock.
    MessageFuture,
    /// Authenticator time is too old.
    MessageExpired,
    /// Message could not be parsed.
    MessageInvalid,
    /// Payload failed validation.
    ValidationError,
    /// Site not registered.
    SiteNotFound,
    /// Server-side provisioning failure.
    ProvisionError,
    /// Any code outside the known set.
    Unknown(i64),
}

impl ErrorCode {
    /// Numeric wire value.
    pub fn code(self) -> i64 {
        match self {
            ErrorCode::NotFound => 1000,
            ErrorCode::KeyMismatch => 1100,
            ErrorCode::Expired => 1200,
            ErrorCode::Replay => 1300,
            ErrorCode::KeyNotFound => 1400,
            ErrorCode::MessageFuture => 1500,
            ErrorCode::MessageExpired => 1600,
            ErrorCode::MessageInvalid => 1700,
            ErrorCode::ValidationError => 1800,
            ErrorCode::SiteNotFound => 1900,
            ErrorCode::ProvisionError => 9000,
            ErrorCode::Unknown(code) => code,
        }
    }

    /// True for codes stating the credentials themselves were refused.
    pub fn is_credential_rejection(self) -> bool {
        matches!(
            self,
            ErrorCode::NotFound | ErrorCode::KeyMismatch | ErrorCode::KeyNotFound
        )
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            1000 => ErrorCode::NotFound,
            1100 => ErrorCode::KeyMismatch,
            1200 => ErrorCode::Expired,
            1300 => ErrorCode::Replay,
            1400 => ErrorCode::KeyNotFound,
            1500 => ErrorCode::MessageFuture,
            1600 => ErrorCode::MessageExpired,
            1700 => ErrorCode::MessageInvalid,
            1800 => ErrorCode::ValidationError,
            1900 => ErrorCode::SiteNotFound,
            9000 => ErrorCode::ProvisionError,
            other => ErrorCode::Unknown(other),
        }
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCode::NotFound => "not found",
            ErrorCode::KeyMismatch => "key mismatch",
            ErrorCode::Expired => "subscription expired",
            ErrorCode::Replay => "replay",
            ErrorCode::KeyNotFound => "key not found",
            ErrorCode::MessageFuture => "message from the future",
            ErrorCode::MessageExpired => "message expired",
            ErrorCode::MessageInvalid => "message invalid",
            ErrorCode::ValidationError => "validation error",
            ErrorCode::SiteNotFound => "site not found",
            ErrorCode::ProvisionError => "provisioning error",
            ErrorCode::Unknown(_) => "unknown",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// Remote error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `true` on the wire.
    pub error: bool,
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

impl ErrorEnvelope {
    /// Build an error envelope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code,
            message: message.into(),
        }
    }

    /// Recognize an error envelope in a decoded JSON document.
    ///
    /// Returns `None` unless `error` is `true` and `code` is an integer.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.get("error").and_then(Value::as_bool) != Some(true) {
            return None;
        }
        let code = obj.get("code").and_then(Value::as_i64)?;
        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self::new(ErrorCode::from(code), message))
    }
}
