// crates.io
use httpmock::prelude::*;
// self
use spotify_probe::{
	auth::TokenCache,
	config::{CredentialResolver, ProbeConfig},
	error::{AuthError, ConfigError, Error},
	url::Url,
};

const CLIENT_ID: &str = "probe-client";
const CLIENT_SECRET: &str = "probe-secret";
// base64("probe-client:probe-secret")
const BASIC_AUTH: &str = "Basic cHJvYmUtY2xpZW50OnByb2JlLXNlY3JldA==";

fn config_for(server: &MockServer) -> ProbeConfig {
	ProbeConfig::new(
		Url::parse(&server.url("/api/token")).expect("Mock token endpoint should parse."),
	)
}

fn explicit_resolver() -> CredentialResolver {
	CredentialResolver::explicit(CLIENT_ID, CLIENT_SECRET)
}

fn cache_for(server: &MockServer) -> TokenCache {
	TokenCache::new(config_for(server), explicit_resolver())
		.expect("Cache should build its HTTP client.")
}

#[tokio::test]
async fn exchange_caches_token_and_serves_hits_with_zero_duration() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/token")
				.header("authorization", BASIC_AUTH)
				.body_includes("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"cached-token\",\"token_type\":\"bearer\",\"expires_in\":1800}",
			);
		})
		.await;
	let mut cache = cache_for(&server);
	let (first, first_duration) =
		cache.access_token(false).await.expect("Initial exchange should succeed.");
	let (second, second_duration) =
		cache.access_token(false).await.expect("Cache hit should succeed.");

	assert_eq!(first.expose(), "cached-token");
	assert_eq!(second.expose(), "cached-token");
	assert!(first_duration > std::time::Duration::ZERO);
	assert_eq!(second_duration, std::time::Duration::ZERO);
	assert!(cache.is_valid());
	// 1800s nominal minus the default 30s skew margin.
	assert!(cache.seconds_until_expiry() <= 1770);
	assert!(cache.seconds_until_expiry() > 1700);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn force_refresh_exchanges_even_when_the_cache_is_valid() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fresh-token\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let mut cache = cache_for(&server);

	cache.access_token(true).await.expect("First forced exchange should succeed.");

	assert!(cache.is_valid());

	let (token, duration) =
		cache.access_token(true).await.expect("Second forced exchange should succeed.");

	assert_eq!(token.expose(), "fresh-token");
	assert!(duration > std::time::Duration::ZERO);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn expired_token_triggers_a_refresh_without_forcing() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			// 30s nominal lifetime minus the default 30s margin: expired on arrival.
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"stale-token\",\"token_type\":\"bearer\",\"expires_in\":30}",
			);
		})
		.await;
	let mut cache = cache_for(&server);

	cache.access_token(false).await.expect("Initial exchange should succeed.");

	assert!(!cache.is_valid());
	assert_eq!(cache.seconds_until_expiry(), 0);

	cache.access_token(false).await.expect("Refresh of the expired token should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200);
		})
		.await;
	let resolver = CredentialResolver::from_env().with_lookup(|_| None);
	let mut cache = TokenCache::new(config_for(&server), resolver)
		.expect("Cache should build its HTTP client.");
	let err = cache.access_token(true).await.expect_err("Missing credentials should fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingClientId)));
	assert!(!cache.is_valid());

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn rejected_request_reports_status_and_a_bounded_preview() {
	let server = MockServer::start_async().await;
	let long_body = "denied ".repeat(500);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(403).body(&long_body);
		})
		.await;
	let mut cache = cache_for(&server);
	let err = cache.access_token(true).await.expect_err("403 should surface as an error.");
	let Error::Http(http) = err else {
		panic!("Expected an HTTP error, got: {err:?}");
	};

	assert_eq!(http.status, 403);
	assert!(http.body_preview.chars().count() <= 200);
	assert!(long_body.chars().count() > 200);
	assert!(!cache.is_valid());
}

#[tokio::test]
async fn missing_access_token_leaves_the_cache_untouched() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"bearer\",\"expires_in\":3600}");
		})
		.await;
	let mut cache = cache_for(&server);
	let err = cache
		.access_token(true)
		.await
		.expect_err("A 200 without access_token should surface as an error.");

	assert!(matches!(err, Error::Auth(AuthError::MissingAccessToken)));
	assert!(!cache.is_valid());
	assert_eq!(cache.seconds_until_expiry(), 0);
}

#[tokio::test]
async fn malformed_payload_is_a_schema_violation_not_a_rejection() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).header("content-type", "text/html").body("<html>not json</html>");
		})
		.await;
	let mut cache = cache_for(&server);
	let err = cache.access_token(true).await.expect_err("Malformed JSON should surface.");

	assert!(matches!(err, Error::Auth(AuthError::MalformedPayload { .. })));
	assert!(!cache.is_valid());
}
