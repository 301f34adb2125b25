//! Expiry-aware cache around the client-credentials token exchange.
//!
//! The contract is intentionally small: at most one externally visible refresh
//! per call when the cache is valid, always exactly one refresh when the cache
//! is invalid or the caller forces one. A returned duration of exactly zero
//! signals "served from cache".
//!
//! The cache is not thread-safe and is not designed to be shared across
//! concurrent callers; serialize access externally if that is ever needed.

// std
use std::time::Instant;
// crates.io
use reqwest::StatusCode;
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	config::{CredentialResolver, ProbeConfig},
	error::{AuthError, ConfigError, HttpError},
};

/// In-memory cache holding at most one bearer token for one credentials pair.
#[derive(Debug)]
pub struct TokenCache {
	config: ProbeConfig,
	resolver: CredentialResolver,
	client: ReqwestClient,
	token: Option<CachedToken>,
}
impl TokenCache {
	/// Builds a cache with its own HTTP client.
	///
	/// Token endpoints return results directly instead of delegating to another
	/// URI, so redirect following is disabled.
	pub fn new(config: ProbeConfig, resolver: CredentialResolver) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self::with_client(config, resolver, client))
	}

	/// Builds a cache around a caller-provided HTTP client.
	pub fn with_client(
		config: ProbeConfig,
		resolver: CredentialResolver,
		client: ReqwestClient,
	) -> Self {
		Self { config, resolver, client, token: None }
	}

	/// Returns a valid access token plus the duration of the network round trip.
	///
	/// A forced refresh, an empty cache, or an expired token triggers exactly one
	/// exchange; a valid cache is returned unchanged with a duration of
	/// [`StdDuration::ZERO`].
	pub async fn access_token(
		&mut self,
		force_refresh: bool,
	) -> Result<(TokenSecret, StdDuration)> {
		if !force_refresh {
			let now = OffsetDateTime::now_utc();

			if let Some(token) = self.token.as_ref().filter(|token| token.is_valid_at(now)) {
				tracing::debug!(expires_at = %token.expires_at, "serving access token from cache");

				return Ok((token.access_token.clone(), StdDuration::ZERO));
			}
		}

		self.refresh().await
	}

	/// Returns `true` iff a token is cached and `instant` is strictly before its
	/// adjusted expiry. Pure function of state and the provided clock.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.token.as_ref().is_some_and(|token| token.is_valid_at(instant))
	}

	/// Validity check against the current UTC instant.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Whole seconds until the cached token expires at `instant`; 0 when the
	/// cache is empty, never negative.
	pub fn seconds_until_expiry_at(&self, instant: OffsetDateTime) -> u64 {
		self.token.as_ref().map(|token| token.seconds_until_expiry_at(instant)).unwrap_or(0)
	}

	/// Seconds until expiry relative to the current clock.
	pub fn seconds_until_expiry(&self) -> u64 {
		self.seconds_until_expiry_at(OffsetDateTime::now_utc())
	}

	/// Performs one client-credentials exchange and overwrites the cache.
	///
	/// Credentials are resolved before any network I/O so a [`ConfigError`]
	/// never costs a request. The returned duration covers strictly the network
	/// round trip, from just before dispatch to just after the body arrives.
	async fn refresh(&mut self) -> Result<(TokenSecret, StdDuration)> {
		let credentials = self.resolver.resolve()?;

		tracing::info!(endpoint = %self.config.token_endpoint, "requesting access token");

		let request = self
			.client
			.post(self.config.token_endpoint.clone())
			.basic_auth(credentials.client_id(), Some(credentials.client_secret().expose()))
			.form(&[("grant_type", "client_credentials")]);
		let started = Instant::now();
		let response = request.send().await.map_err(AuthError::network)?;
		let status = response.status();
		let body = response.text().await.map_err(AuthError::network)?;
		let duration = started.elapsed();

		if status != StatusCode::OK {
			return Err(HttpError::new(status.as_u16(), body).into());
		}

		// Parse the full payload before touching cache state; a failure here must
		// leave the previous token (or its absence) intact.
		let payload = parse_token_payload(&body)?;
		let access_token = match payload.access_token {
			Some(value) if !value.is_empty() => value,
			_ => return Err(AuthError::MissingAccessToken.into()),
		};
		let token = CachedToken::issue(
			access_token,
			OffsetDateTime::now_utc(),
			Duration::seconds(payload.expires_in),
			self.config.clock_skew_margin,
		);
		let secret = token.access_token.clone();

		tracing::info!(
			expires_at = %token.expires_at,
			duration_ms = duration.as_millis() as u64,
			"access token refreshed"
		);

		self.token = Some(token);

		Ok((secret, duration))
	}
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
	access_token: Option<String>,
	#[serde(default = "default_expires_in")]
	expires_in: i64,
}

// A payload without `expires_in` is treated as the endpoint's standard one hour.
fn default_expires_in() -> i64 {
	3600
}

fn parse_token_payload(body: &str) -> Result<TokenPayload, AuthError> {
	let mut deserializer = serde_json::Deserializer::from_str(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| AuthError::MalformedPayload { source })
}
