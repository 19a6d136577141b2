//! Subscription record as reported by the network service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Params;

/// Fields of a validated subscription response the connector relies on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    /// Whether the subscription is currently active.
    pub active: bool,
    /// Subscription UUID.
    pub uuid: Option<String>,
    /// Link to the subscription dashboard.
    pub href: Option<String>,
    /// Expiry date as sent by the service.
    pub expiration_date: Option<String>,
    /// Salt for search key derivation.
    pub derived_key_salt: Option<String>,
}

impl SubscriptionInfo {
    /// Read the known fields out of a response body. Unknown fields are
    /// ignored and missing ones left empty.
    pub fn from_params(body: &Params) -> Self {
        let text = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

        let active = match body.get("active") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
            _ => false,
        };

        let expiration_date = match body.get("expiration_date") {
            Some(Value::Object(obj)) => obj.get("value").and_then(Value::as_str).map(str::to_string),
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        Self {
            active,
            uuid: text("uuid"),
            href: text("href"),
            expiration_date,
            derived_key_salt: text("derived_key_salt"),
        }
    }
}
