//! # Signed Envelope
//!
//! The `{ "body": ..., "authenticator": ... }` wrapper carried by every call
//! to and from the network service.
//!
//! ## Security Properties
//!
//! - **Freshness**: `time` and `nonce` are hashed together with the payload.
//! - **Binding**: a response echoes the request nonce, tying it to one call.
//! - **Key selection**: `identifier` travels in the clear and is excluded from
//!   the hash.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered key/value payload. Insertion order is preserved because it is part
/// of both canonical encodings.
pub type Params = serde_json::Map<String, Value>;

/// Name of the payload field selecting the canonicalization scheme.
pub const RPC_VERSION_FIELD: &str = "rpc_version";

/// Authenticator block attached to a signed request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticator {
    /// Signer's clock at signing time (Unix seconds).
    pub time: u64,

    /// Single-use random value.
    pub nonce: String,

    /// Digest over time, nonce and payload; encoding depends on `RpcVersion`.
    pub hash: String,

    /// Public account/environment identifier. Never hashed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// A payload together with its authenticator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope<T = Params> {
    /// Domain payload.
    pub body: T,
    /// Proof the sender holds the shared secret.
    pub authenticator: Authenticator,
}

/// Canonicalization/hash scheme.
///
/// | Variant | `rpc_version` | Canonical string | Output |
/// |---------|---------------|------------------|--------|
/// | `Legacy` | unset or < 2 | `time:nonce:key:serialize(params)` | base64 |
/// | `V2` | 2 | `time:nonce:json(params)` | hex |
/// | `PingOnly` | > 2 | `time:nonce` | hex |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RpcVersion {
    /// Language-specific serializer, base64 output
    #[default]
    Legacy,
    /// Portable JSON, hex output
    V2,
    /// No payload in the hash, hex output
    PingOnly,
}

impl RpcVersion {
    /// Infer the scheme from a payload's `rpc_version` field.
    ///
    /// Integers and numeric strings are accepted. Anything absent,
    /// non-numeric or below 2 selects `Legacy`.
    pub fn from_params(params: &Params) -> Self {
        Self::from_value(params.get(RPC_VERSION_FIELD))
    }

    /// Infer the scheme from a raw `rpc_version` value.
    pub fn from_value(value: Option<&Value>) -> Self {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(Value::Bool(true)) => Some(1.0),
            _ => None,
        };
        match number {
            Some(v) if v > 2.0 => RpcVersion::PingOnly,
            Some(v) if v == 2.0 => RpcVersion::V2,
            _ => RpcVersion::Legacy,
        }
    }

    /// The integer written into payloads for this scheme.
    pub fn tag(self) -> u64 {
        match self {
            RpcVersion::Legacy => 1,
            RpcVersion::V2 => 2,
            RpcVersion::PingOnly => 3,
        }
    }
}

impl std::fmt::Display for RpcVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcVersion::Legacy => write!(f, "legacy"),
            RpcVersion::V2 => write!(f, "v2"),
            RpcVersion::PingOnly => write!(f, "ping-only"),
        }
    }
}
