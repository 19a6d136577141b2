//! # Loopback Network Service
//!
//! In-process stand-in for the Acquia Network service, used as an
//! `HttpTransport` in tests and offline tooling.
//!
//! ## Checks (in order)
//!
//! 1. Unknown identifier or email: `NotFound` (1000)
//! 2. Authenticator time outside ±15 minutes: `MessageExpired` (1600) or
//!    `MessageFuture` (1500)
//! 3. Hash mismatch over the body without `identifier`: `KeyMismatch` (1100)
//! 4. Nonce already seen: `Replay` (1300)
//!
//! Accepted requests get a response signed with the same key, echoing the
//! request nonce, with a time strictly after the request time.

use crate::adapters::crypt::{SaltedSha1Crypt, SALTED_SHA1};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::TransportError;
use crate::ports::outbound::{CommunicationSettings, HttpResponse, HttpTransport, PasswordCrypt};
use acn_01_request_signing::{compute_hash, Clock};
use parking_lot::RwLock;
use serde_json::{json, Value};
use shared_crypto::SecretKey;
use shared_types::{
    validate_timestamp, Authenticator, ErrorCode, ErrorEnvelope, KeyProvider, NonceCache, Params,
    RpcVersion, SignedEnvelope, TimeWindowError, RPC_VERSION_FIELD,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

// =============================================================================
// TEST ACCOUNTS
// =============================================================================

/// Base URL the loopback service answers on.
pub const LOOPBACK_URL: &str = "http://loopback.invalid";

/// Identifier of the active test subscription.
pub const TEST_IDENTIFIER: &str = "TEST_AcquiaConnectorTestID";
/// Key shared by all test subscriptions.
pub const TEST_KEY: &str = "TEST_AcquiaConnectorTestKey";
/// Identifier answering `Expired` (1200).
pub const EXPIRED_IDENTIFIER: &str = "TEST_AcquiaConnectorTestIDExp";
/// Identifier answering HTTP 503 without an envelope.
pub const UNAVAILABLE_IDENTIFIER: &str = "TEST_AcquiaConnectorTestID503";
/// Identifier answering `ProvisionError` (9000).
pub const PROVISION_ERROR_IDENTIFIER: &str = "TEST_AcquiaConnectorTestIDErr";
/// Email of the active test subscription.
pub const TEST_EMAIL: &str = "TEST_networkuser@example.com";
/// Password of the active test subscription.
pub const TEST_PASSWORD: &str = "TEST_password";
/// Password hash setting advertised for the test email.
pub const TEST_HASH_SETTING: &str = "$S$5TEST_salt";

/// How the loopback service treats calls for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountBehavior {
    /// Authenticated calls succeed.
    Active,
    /// Authenticated calls get `Expired` (1200).
    Expired,
    /// Every call gets a bare HTTP 503.
    Unavailable,
    /// Authenticated calls get `ProvisionError` (9000).
    ProvisionError,
}

#[derive(Debug, Clone)]
struct Account {
    key: SecretKey,
    behavior: AccountBehavior,
    login: Option<(String, String)>,
}

enum Refusal {
    Unavailable,
    Error(ErrorCode, &'static str),
}

// =============================================================================
// SERVICE
// =============================================================================

/// In-process network service.
pub struct LoopbackNetwork {
    clock: Arc<dyn Clock>,
    accounts: RwLock<HashMap<String, Account>>,
    nonces: NonceCache,
    requests: AtomicUsize,
    offline: AtomicBool,
    tamper: AtomicBool,
}

impl LoopbackNetwork {
    /// Empty service reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            accounts: RwLock::new(HashMap::new()),
            nonces: NonceCache::new(),
            requests: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
            tamper: AtomicBool::new(false),
        }
    }

    /// Service preloaded with the four test accounts.
    pub fn with_test_accounts(clock: Arc<dyn Clock>) -> Self {
        let network = Self::new(clock);
        let key = SecretKey::from(TEST_KEY);
        network.add_account(TEST_IDENTIFIER, key.clone(), AccountBehavior::Active);
        network.add_account(EXPIRED_IDENTIFIER, key.clone(), AccountBehavior::Expired);
        network.add_account(UNAVAILABLE_IDENTIFIER, key.clone(), AccountBehavior::Unavailable);
        network.add_account(PROVISION_ERROR_IDENTIFIER, key, AccountBehavior::ProvisionError);
        network.set_login(TEST_IDENTIFIER, TEST_EMAIL, TEST_PASSWORD);
        network
    }

    /// Register or replace an account.
    pub fn add_account(&self, identifier: &str, key: SecretKey, behavior: AccountBehavior) {
        self.accounts.write().insert(
            identifier.to_string(),
            Account {
                key,
                behavior,
                login: None,
            },
        );
    }

    /// Attach an email/password login to an existing account.
    pub fn set_login(&self, identifier: &str, email: &str, password: &str) {
        if let Some(account) = self.accounts.write().get_mut(identifier) {
            account.login = Some((email.to_string(), password.to_string()));
        }
    }

    /// Change how an existing account is answered.
    pub fn set_behavior(&self, identifier: &str, behavior: AccountBehavior) {
        if let Some(account) = self.accounts.write().get_mut(identifier) {
            account.behavior = behavior;
        }
    }

    /// Refuse connections entirely.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Alter response bodies after signing them.
    pub fn set_tamper_responses(&self, tamper: bool) {
        self.tamper.store(tamper, Ordering::SeqCst);
    }

    /// Number of requests received, including refused ones.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn handle(&self, url: &str, body: &[u8]) -> Result<HttpResponse, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError("connection refused".to_string()));
        }

        let Some(endpoint) = Endpoint::from_path(url_path(url)) else {
            return Ok(plain(404, "Not Found"));
        };

        let request: SignedEnvelope = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(_) => return Ok(error(ErrorCode::MessageInvalid, "Message invalid")),
        };

        let outcome = match endpoint {
            Endpoint::CommunicationSettings => self.communication(&request),
            Endpoint::SubscriptionCredentials => self.credentials(&request),
            ref other => self.account_call(other, &request),
        };

        match outcome {
            Ok((key, reply)) => Ok(self.signed_reply(&key, &request, reply)),
            Err(Refusal::Unavailable) => Ok(plain(503, "Service Unavailable")),
            Err(Refusal::Error(code, message)) => {
                debug!(endpoint = endpoint.name(), code = code.code(), "Loopback refused request");
                Ok(error(code, message))
            }
        }
    }

    fn account_call(
        &self,
        endpoint: &Endpoint,
        request: &SignedEnvelope,
    ) -> Result<(SecretKey, Params), Refusal> {
        let identifier = request
            .authenticator
            .identifier
            .clone()
            .or_else(|| request.body.get("identifier").and_then(Value::as_str).map(str::to_string))
            .ok_or(Refusal::Error(ErrorCode::ValidationError, "Identifier missing"))?;

        let behavior = self
            .accounts
            .read()
            .get(&identifier)
            .map(|a| a.behavior)
            .ok_or(Refusal::Error(ErrorCode::NotFound, "Subscription not found"))?;
        if behavior == AccountBehavior::Unavailable {
            return Err(Refusal::Unavailable);
        }

        let key = self
            .get_shared_secret(&identifier)
            .ok_or(Refusal::Error(ErrorCode::KeyNotFound, "Key not found"))?;
        self.authenticate(&key, request)?;

        match behavior {
            AccountBehavior::Expired => {
                Err(Refusal::Error(ErrorCode::Expired, "Subscription expired"))
            }
            AccountBehavior::ProvisionError => {
                Err(Refusal::Error(ErrorCode::ProvisionError, "Provisioning error"))
            }
            AccountBehavior::Unavailable | AccountBehavior::Active => {
                Ok((key, reply_for(endpoint, &identifier, self.clock.now())))
            }
        }
    }

    fn communication(&self, request: &SignedEnvelope) -> Result<(SecretKey, Params), Refusal> {
        let email = request_email(request)?;
        self.login_for(&email)?;

        let key = SecretKey::from(email.as_str());
        self.authenticate(&key, request)?;
        Ok((key, to_params(json!(test_settings()))))
    }

    fn credentials(&self, request: &SignedEnvelope) -> Result<(SecretKey, Params), Refusal> {
        let email = request_email(request)?;
        let (identifier, password, account_key) = self.login_for(&email)?;

        let key = SaltedSha1Crypt
            .crypt(&password, &test_settings())
            .ok_or(Refusal::Error(ErrorCode::ProvisionError, "Crypt unavailable"))?;
        self.authenticate(&key, request)?;

        let reply = json!({
            "identifier": identifier,
            "key": String::from_utf8_lossy(account_key.as_bytes()),
        });
        Ok((key, to_params(reply)))
    }

    fn login_for(&self, email: &str) -> Result<(String, String, SecretKey), Refusal> {
        self.accounts
            .read()
            .iter()
            .find_map(|(identifier, account)| match &account.login {
                Some((e, password)) if e == email => {
                    Some((identifier.clone(), password.clone(), account.key.clone()))
                }
                _ => None,
            })
            .ok_or(Refusal::Error(ErrorCode::NotFound, "Account not found"))
    }

    fn authenticate(&self, key: &SecretKey, request: &SignedEnvelope) -> Result<(), Refusal> {
        let auth = &request.authenticator;
        match validate_timestamp(auth.time, self.clock.now()) {
            Ok(()) => {}
            Err(TimeWindowError::TooOld { .. }) => {
                return Err(Refusal::Error(ErrorCode::MessageExpired, "Message expired"))
            }
            Err(TimeWindowError::FromFuture { .. }) => {
                return Err(Refusal::Error(ErrorCode::MessageFuture, "Message from the future"))
            }
        }

        let mut hashed = request.body.clone();
        hashed.remove("identifier");
        let expected = compute_hash(
            key,
            auth.time,
            &auth.nonce,
            RpcVersion::from_params(&hashed),
            &hashed,
        );
        if !bool::from(expected.as_bytes().ct_eq(auth.hash.as_bytes())) {
            warn!("Loopback rejected request hash");
            return Err(Refusal::Error(ErrorCode::KeyMismatch, "Key mismatch"));
        }

        if !self.nonces.check_and_insert(&auth.nonce, self.clock.now()) {
            return Err(Refusal::Error(ErrorCode::Replay, "Nonce already used"));
        }
        Ok(())
    }

    fn signed_reply(&self, key: &SecretKey, request: &SignedEnvelope, mut body: Params) -> HttpResponse {
        if let Some(version) = request.body.get(RPC_VERSION_FIELD) {
            body.insert(RPC_VERSION_FIELD.to_string(), version.clone());
        }

        let time = self.clock.now().max(request.authenticator.time + 1);
        let nonce = request.authenticator.nonce.clone();
        let hash = compute_hash(key, time, &nonce, RpcVersion::from_params(&body), &body);

        if self.tamper.load(Ordering::SeqCst) {
            body.insert("tampered".to_string(), Value::Bool(true));
        }

        let envelope = SignedEnvelope {
            body,
            authenticator: Authenticator {
                time,
                nonce,
                hash,
                identifier: None,
            },
        };
        match serde_json::to_vec(&envelope) {
            Ok(bytes) => json_response(200, bytes),
            Err(_) => plain(500, "Internal Server Error"),
        }
    }
}

impl KeyProvider for LoopbackNetwork {
    fn get_shared_secret(&self, identifier: &str) -> Option<SecretKey> {
        self.accounts.read().get(identifier).map(|a| a.key.clone())
    }
}

#[async_trait::async_trait]
impl HttpTransport for LoopbackNetwork {
    async fn post(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        self.handle(url, &body)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn test_settings() -> CommunicationSettings {
    CommunicationSettings {
        algorithm: SALTED_SHA1.to_string(),
        hash_setting: TEST_HASH_SETTING.to_string(),
        extra_md5: false,
    }
}

fn request_email(request: &SignedEnvelope) -> Result<String, Refusal> {
    request
        .body
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(Refusal::Error(ErrorCode::ValidationError, "Email missing"))
}

fn reply_for(endpoint: &Endpoint, identifier: &str, now: u64) -> Params {
    let reply = match endpoint {
        Endpoint::Subscription => json!({
            "active": true,
            "href": format!("https://network.example.com/subscription/{identifier}"),
            "uuid": format!("uuid-{identifier}"),
            "expiration_date": {"value": "2038-01-01T00:00:00"},
            "derived_key_salt": format!("salt-{identifier}"),
        }),
        Endpoint::SpiDefinition(version) => json!({
            "spi_def_timestamp": now,
            "drupal_version": version,
            "acquia_spi_variables": {},
        }),
        Endpoint::SpiSubmit => json!({
            "spi_data_received": true,
            "site_revoked": false,
            "nspi_messages": [],
        }),
        Endpoint::MigrationEnvironments => json!({
            "environments": {
                "dev": {"url": "https://dev.example.com", "stage": "dev"},
            },
        }),
        Endpoint::MigrationComplete => json!({"success": true}),
        Endpoint::CommunicationSettings | Endpoint::SubscriptionCredentials => json!({}),
    };
    to_params(reply)
}

fn to_params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

fn url_path(url: &str) -> &str {
    let rest = url.find("://").map_or(url, |i| &url[i + 3..]);
    rest.find('/').map_or("/", |i| &rest[i..])
}

fn plain(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "text/plain".to_string())],
        body: body.as_bytes().to_vec(),
    }
}

fn json_response(status: u16, body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body,
    }
}

fn error(code: ErrorCode, message: &str) -> HttpResponse {
    match serde_json::to_vec(&ErrorEnvelope::new(code, message)) {
        Ok(bytes) => json_response(200, bytes),
        Err(_) => plain(500, "Internal Server Error"),
    }
}
