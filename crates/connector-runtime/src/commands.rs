//! CLI command implementations. Each returns the text printed on stdout.

use crate::container::ConnectorContainer;
use acn_01_request_signing::RequestSigningApi;
use acn_02_search_auth::{SearchAuthApi, SearchRequest};
use acn_04_subscription::SubscriptionApi;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fmt::Write as _;

/// Report the subscription state, refreshing it if due (or always with
/// `force`).
pub async fn status(container: &ConnectorContainer, force: bool) -> Result<String> {
    let state = if force {
        container.tracker.force_refresh().await
    } else {
        container.tracker.refresh_if_due().await
    };

    let mut out = String::new();
    writeln!(out, "state: {state}")?;
    match container.tracker.last_checked() {
        Some(t) => writeln!(out, "last checked: {t}")?,
        None => writeln!(out, "last checked: never")?,
    }
    if let Some(info) = state.info() {
        if let Some(expiration) = &info.expiration_date {
            writeln!(out, "expires: {expiration}")?;
        }
        if let Some(href) = &info.href {
            writeln!(out, "dashboard: {href}")?;
        }
    }
    Ok(out)
}

/// Wrap a JSON object in a signed envelope with the configured key.
pub fn sign(container: &ConnectorContainer, params: &str) -> Result<String> {
    let value: Value = serde_json::from_str(params).context("--params is not valid JSON")?;
    let Value::Object(body) = value else {
        bail!("--params must be a JSON object");
    };

    let envelope = container
        .signer
        .sign(&container.key(), body)
        .context("Cannot sign without a configured key")?;
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Build the search `Cookie` header for one request.
pub async fn search_cookie(
    container: &ConnectorContainer,
    env: &str,
    path_and_query: &str,
    body: Option<String>,
) -> Result<String> {
    container.tracker.refresh_if_due().await;
    container.sync_search_salt();

    let request = match body {
        Some(body) => SearchRequest::Post {
            path_and_query: path_and_query.to_string(),
            body,
        },
        None => SearchRequest::Get {
            path_and_query: path_and_query.to_string(),
        },
    };

    let signed = container
        .search
        .sign_request(env, request)
        .with_context(|| format!("Cannot sign search request for {env}"))?;

    let mut out = String::new();
    writeln!(out, "path: {}", signed.path_and_query)?;
    writeln!(out, "cookie: {}", signed.cookie)?;
    writeln!(out, "nonce: {}", signed.nonce)?;
    Ok(out)
}
