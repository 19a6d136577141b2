//! # Search Flows
//!
//! SearchAuthenticator against an in-test search endpoint that derives the
//! same key on its side, checks the cookie and answers with a `Pragma`
//! digest.
//!
//! ## Flows Tested
//!
//! 1. GET and POST requests verified by the endpoint, responses verified by
//!    the client
//! 2. Tampered responses and foreign nonces rejected
//! 3. Subscription salt reaching the search signer through the runtime

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use acn_01_request_signing::{Clock, FixedClock, SequenceNonce};
    use acn_02_search_auth::{
        derive_key, find_pragma, search_hmac, SearchAuthApi, SearchAuthError,
        SearchAuthenticator, SearchRequest, SignedSearchRequest, StaticDerivationSource,
    };
    use acn_03_network_client::{LoopbackNetwork, LOOPBACK_URL, TEST_IDENTIFIER, TEST_KEY};
    use connector_runtime::config::SearchEnvironment;
    use connector_runtime::{commands, ConnectorConfig, ConnectorContainer};
    use shared_crypto::{encode_hex, hmac_sha1, SecretKey};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_000_000_000;
    const SALT: &str = "subscription-salt";
    const INDEX: &str = "ABCD-12345";

    type Search = SearchAuthenticator<StaticDerivationSource, FixedClock, SequenceNonce>;

    fn authenticator() -> Search {
        let source = StaticDerivationSource::new(SALT, SecretKey::from(TEST_KEY))
            .with_environment("prod", INDEX);
        SearchAuthenticator::new(source, FixedClock::new(NOW), SequenceNonce::new("solr"))
    }

    fn parse_cookie(cookie: &str) -> HashMap<&str, &str> {
        cookie
            .split(';')
            .filter_map(|part| part.trim().split_once('='))
            .collect()
    }

    /// Search endpoint holding the account key. Verifies the request cookie
    /// and returns `(pragma, body)`.
    fn search_endpoint(request: &SignedSearchRequest, answer: &str) -> Option<(String, String)> {
        let key = derive_key(SALT, INDEX, &SecretKey::from(TEST_KEY))?;
        let cookie = parse_cookie(&request.cookie);
        let time: u64 = cookie.get("acquia_solr_time")?.parse().ok()?;
        let nonce = *cookie.get("acquia_solr_nonce")?;
        let signed = request.body.as_deref().unwrap_or(&request.path_and_query);

        if search_hmac(&key, time, nonce, signed) != *cookie.get("acquia_solr_hmac")? {
            return None;
        }

        let digest = encode_hex(&hmac_sha1(key.as_bytes(), format!("{nonce}{answer}").as_bytes()));
        Some((format!("no-cache, hmac_digest={digest};"), answer.to_string()))
    }

    // =============================================================================
    // ROUND TRIPS
    // =============================================================================

    #[test]
    fn test_get_round_trip() {
        let search = authenticator();
        let request = search
            .sign_request(
                "prod",
                SearchRequest::Get {
                    path_and_query: format!("/solr/{INDEX}/select?q=drupal"),
                },
            )
            .unwrap();

        let (pragma, body) = search_endpoint(&request, r#"{"response":{"numFound":0}}"#).unwrap();
        let headers = [("Content-Type", "application/json"), ("Pragma", pragma.as_str())];
        search
            .validate_response("prod", &request.nonce, find_pragma(headers), body.as_bytes())
            .unwrap();
    }

    #[test]
    fn test_post_round_trip() {
        let search = authenticator();
        let request = search
            .sign_request(
                "prod",
                SearchRequest::Post {
                    path_and_query: format!("/solr/{INDEX}/update"),
                    body: r#"{"add":{"doc":{"id":"1"}}}"#.to_string(),
                },
            )
            .unwrap();

        let (pragma, body) = search_endpoint(&request, r#"{"responseHeader":{"status":0}}"#).unwrap();
        search
            .validate_response("prod", &request.nonce, Some(&pragma), body.as_bytes())
            .unwrap();
    }

    #[test]
    fn test_endpoint_rejects_altered_request() {
        let search = authenticator();
        let mut request = search
            .sign_request(
                "prod",
                SearchRequest::Get {
                    path_and_query: format!("/solr/{INDEX}/select?q=drupal"),
                },
            )
            .unwrap();
        request.path_and_query = format!("/solr/{INDEX}/select?q=other");
        assert!(search_endpoint(&request, "{}").is_none());
    }

    #[test]
    fn test_tampered_response_and_foreign_nonce() {
        let search = authenticator();
        let get = SearchRequest::Get {
            path_and_query: format!("/solr/{INDEX}/select?q=x"),
        };
        let first = search.sign_request("prod", get.clone()).unwrap();
        let second = search.sign_request("prod", get).unwrap();
        assert_ne!(first.nonce, second.nonce);

        let (pragma, body) = search_endpoint(&first, "{}").unwrap();

        assert_eq!(
            search.validate_response("prod", &first.nonce, Some(&pragma), b"{\"x\":1}"),
            Err(SearchAuthError::DigestMismatch)
        );
        assert_eq!(
            search.validate_response("prod", &second.nonce, Some(&pragma), body.as_bytes()),
            Err(SearchAuthError::DigestMismatch)
        );
        assert_eq!(
            search.validate_response("prod", &first.nonce, None, body.as_bytes()),
            Err(SearchAuthError::MissingPragma)
        );
    }

    #[test]
    fn test_salt_rotation_needs_clear() {
        let search = authenticator();
        let get = SearchRequest::Get {
            path_and_query: format!("/solr/{INDEX}/select?q=x"),
        };
        search.sign_request("prod", get.clone()).unwrap();

        search.source().set_salt("rotated");
        let stale = search.sign_request("prod", get.clone()).unwrap();
        assert!(search_endpoint(&stale, "{}").is_some());

        search.clear();
        let fresh = search.sign_request("prod", get).unwrap();
        assert!(search_endpoint(&fresh, "{}").is_none());
    }

    // =============================================================================
    // SUBSCRIPTION → SEARCH
    // =============================================================================

    #[tokio::test]
    async fn test_runtime_takes_salt_from_subscription() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(NOW));
        let network = Arc::new(LoopbackNetwork::with_test_accounts(clock.clone()));

        let mut config = ConnectorConfig::default();
        config.network.server_url = LOOPBACK_URL.to_string();
        config.credentials.identifier = Some(TEST_IDENTIFIER.to_string());
        config.credentials.key = Some(TEST_KEY.to_string());
        config.search.environments.push(SearchEnvironment {
            id: "prod".to_string(),
            index_identifier: INDEX.to_string(),
        });
        let container = ConnectorContainer::with_transport(config, network.clone(), clock);

        // No salt yet: nothing to derive from
        assert!(container
            .search
            .sign_request("prod", SearchRequest::Get { path_and_query: "/select".to_string() })
            .is_err());

        let out = commands::search_cookie(&container, "prod", "/select?q=x", None)
            .await
            .unwrap();
        assert!(out.contains("acquia_solr_hmac="));
        assert_eq!(network.requests(), 1);

        let expected = derive_key(
            &format!("salt-{TEST_IDENTIFIER}"),
            INDEX,
            &SecretKey::from(TEST_KEY),
        )
        .unwrap();
        assert_eq!(
            container.search.derived_key("prod").unwrap().as_bytes(),
            expected.as_bytes()
        );
    }
}
