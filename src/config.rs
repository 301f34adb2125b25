//! Probe settings and credential resolution.
//!
//! Credential resolution is a pure function of (explicit value, environment
//! lookup): an explicit non-empty value wins, then the named environment
//! variable. The lookup itself is injectable so tests never touch the process
//! environment.

// std
use std::env;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Spotify token endpoint used by both probe scenarios.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Environment variable supplying the client identifier.
pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable supplying the client secret.
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";
/// Default per-request timeout enforced by the HTTP client.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// Default safety buffer subtracted from a token's nominal expiry.
pub const DEFAULT_CLOCK_SKEW_MARGIN: Duration = Duration::seconds(30);

/// Settings shared by the connectivity probe and the token cache.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
	/// Token endpoint contacted by every request this crate makes.
	pub token_endpoint: Url,
	/// Bounded request timeout applied to the HTTP client.
	pub timeout: StdDuration,
	/// Margin subtracted from `expires_in` so a token is never used within its
	/// last seconds of validity.
	pub clock_skew_margin: Duration,
}
impl ProbeConfig {
	/// Creates a config for the provided endpoint with default timing knobs.
	pub fn new(token_endpoint: Url) -> Self {
		Self {
			token_endpoint,
			timeout: DEFAULT_TIMEOUT,
			clock_skew_margin: DEFAULT_CLOCK_SKEW_MARGIN,
		}
	}

	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the clock-skew margin (negative margins are clamped to zero).
	pub fn with_clock_skew_margin(mut self, margin: Duration) -> Self {
		self.clock_skew_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}
}
impl Default for ProbeConfig {
	fn default() -> Self {
		let token_endpoint =
			Url::parse(SPOTIFY_TOKEN_URL).expect("Hardcoded token endpoint URL should parse.");

		Self::new(token_endpoint)
	}
}

/// Resolved client-credentials pair; immutable once loaded.
#[derive(Clone, Debug)]
pub struct Credentials {
	client_id: String,
	client_secret: TokenSecret,
}
impl Credentials {
	/// Wraps an already-resolved id/secret pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: TokenSecret::new(client_secret) }
	}

	/// Returns the client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Returns the redacted client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}
}

/// Resolves credentials from explicit values with an environment fallback.
#[derive(Clone)]
pub struct CredentialResolver {
	explicit_id: Option<String>,
	explicit_secret: Option<String>,
	lookup: fn(&str) -> Option<String>,
}
impl CredentialResolver {
	/// Resolver that reads both values from the process environment.
	pub fn from_env() -> Self {
		Self { explicit_id: None, explicit_secret: None, lookup: env_lookup }
	}

	/// Resolver seeded with explicit values; the environment still backfills
	/// whichever value is absent or blank.
	pub fn explicit(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			explicit_id: Some(client_id.into()),
			explicit_secret: Some(client_secret.into()),
			lookup: env_lookup,
		}
	}

	/// Replaces the environment lookup, keeping resolution pure for tests.
	pub fn with_lookup(mut self, lookup: fn(&str) -> Option<String>) -> Self {
		self.lookup = lookup;

		self
	}

	/// Resolves both values or reports which one is missing.
	pub fn resolve(&self) -> Result<Credentials, ConfigError> {
		let client_id = resolve_value(self.explicit_id.as_deref(), (self.lookup)(CLIENT_ID_ENV))
			.ok_or(ConfigError::MissingClientId)?;
		let client_secret =
			resolve_value(self.explicit_secret.as_deref(), (self.lookup)(CLIENT_SECRET_ENV))
				.ok_or(ConfigError::MissingClientSecret)?;

		Ok(Credentials::new(client_id, client_secret))
	}
}
impl Default for CredentialResolver {
	fn default() -> Self {
		Self::from_env()
	}
}
impl Debug for CredentialResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialResolver")
			.field("explicit_id", &self.explicit_id)
			.field("explicit_secret_set", &self.explicit_secret.is_some())
			.finish()
	}
}

/// Explicit values win over environment lookups; blank values count as absent.
pub fn resolve_value(explicit: Option<&str>, environment: Option<String>) -> Option<String> {
	explicit
		.filter(|value| !value.is_empty())
		.map(str::to_owned)
		.or_else(|| environment.filter(|value| !value.is_empty()))
}

fn env_lookup(name: &str) -> Option<String> {
	env::var(name).ok()
}
