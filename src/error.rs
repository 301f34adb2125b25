//! Error taxonomy shared across the probe scenarios.
//!
//! Every failure is terminal for the current run: the runner logs it once with its
//! full source chain and surfaces it through the presentation layer. Nothing in
//! this crate retries.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Maximum number of characters of a response body carried inside an error.
pub(crate) const BODY_PREVIEW_LIMIT: usize = 200;

/// Canonical probe error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; the user must set credentials or fix settings.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Endpoint was reachable but rejected the request.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Network failure or protocol/schema violation during the exchange.
	#[error(transparent)]
	Auth(#[from] AuthError),
}

/// Configuration and validation failures raised before any request is dispatched.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: reqwest::Error,
	},
	/// No client identifier was supplied explicitly or via the environment.
	#[error("Client ID is not configured. Set SPOTIFY_CLIENT_ID or pass it explicitly.")]
	MissingClientId,
	/// No client secret was supplied explicitly or via the environment.
	#[error("Client secret is not configured. Set SPOTIFY_CLIENT_SECRET or pass it explicitly.")]
	MissingClientSecret,
}
impl From<reqwest::Error> for ConfigError {
	fn from(source: reqwest::Error) -> Self {
		Self::HttpClientBuild { source }
	}
}

/// Token endpoint answered with a non-200 status.
///
/// The body is truncated to [`BODY_PREVIEW_LIMIT`] characters so error messages
/// stay bounded no matter what the endpoint returns.
#[derive(Debug, ThisError)]
#[error("Token endpoint rejected the request with HTTP {status}: {body_preview}")]
pub struct HttpError {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// At most the first 200 characters of the response body.
	pub body_preview: String,
}
impl HttpError {
	/// Wraps a rejected response, truncating the body to the preview limit.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body_preview: truncate_preview(body.into()) }
	}
}

/// Network failures and protocol violations around the token exchange.
///
/// A malformed or incomplete 200 response is kept distinct from [`HttpError`]
/// because it indicates a schema violation rather than a rejected request.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS, timeout).
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: reqwest::Error,
	},
	/// Token endpoint returned a 200 whose body could not be parsed as JSON.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedPayload {
		/// Structured parsing failure carrying the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned a 200 without a usable `access_token` field.
	#[error("Token endpoint response did not contain `access_token`.")]
	MissingAccessToken,
}
impl AuthError {
	/// Wraps a transport-level failure.
	pub fn network(source: reqwest::Error) -> Self {
		Self::Network { source }
	}
}

/// Caps `body` at [`BODY_PREVIEW_LIMIT`] characters.
pub(crate) fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	body.chars().take(BODY_PREVIEW_LIMIT).collect()
}
