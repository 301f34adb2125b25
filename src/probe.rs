//! Unauthenticated reachability check against the token endpoint.
//!
//! Non-200 statuses are data here, not errors: the point of the probe is to
//! report what the endpoint answered, including a 403 when the host is
//! filtered. Only transport failures surface as [`AuthError`].

// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	config::ProbeConfig,
	error::{self, AuthError, ConfigError},
};

/// User-Agent header sent with probe requests.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SpotifyProbe/1.0)";

/// One-shot GET probe against the configured token endpoint.
#[derive(Debug)]
pub struct ConnectivityProbe {
	config: ProbeConfig,
	client: ReqwestClient,
}
impl ConnectivityProbe {
	/// Builds a probe with its own HTTP client.
	pub fn new(config: ProbeConfig) -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().timeout(config.timeout).user_agent(USER_AGENT).build()?;

		Ok(Self::with_client(config, client))
	}

	/// Builds a probe around a caller-provided HTTP client.
	pub fn with_client(config: ProbeConfig, client: ReqwestClient) -> Self {
		Self { config, client }
	}

	/// Issues the GET request and classifies the outcome.
	pub async fn run(&self) -> Result<ProbeReport, AuthError> {
		tracing::info!(endpoint = %self.config.token_endpoint, "sending GET request");

		let started = Instant::now();
		let response = self
			.client
			.get(self.config.token_endpoint.clone())
			.send()
			.await
			.map_err(AuthError::network)?;
		let duration = started.elapsed();
		let status = response.status().as_u16();
		let headers = response
			.headers()
			.iter()
			.map(|(name, value)| {
				(name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
			})
			.collect();
		let verdict = ProbeVerdict::from_status(status);
		let body_preview = if verdict == ProbeVerdict::Unexpected {
			let body = response.text().await.map_err(AuthError::network)?;

			Some(error::truncate_preview(body))
		} else {
			None
		};

		Ok(ProbeReport { status, duration, headers, body_preview, verdict })
	}
}

/// Everything the probe observed about one request/response pair.
#[derive(Clone, Debug)]
pub struct ProbeReport {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Round-trip duration up to the response headers.
	pub duration: StdDuration,
	/// Response headers in arrival order, for the log transcript.
	pub headers: Vec<(String, String)>,
	/// Truncated body, captured only for unexpected statuses.
	pub body_preview: Option<String>,
	/// Classification of the status code.
	pub verdict: ProbeVerdict,
}

/// Classification of the probe outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeVerdict {
	/// 200: the endpoint is reachable from this host.
	Reachable,
	/// 403: the endpoint is blocked or filtered from this host.
	Blocked,
	/// Any other status.
	Unexpected,
}
impl ProbeVerdict {
	/// Maps an HTTP status code onto a verdict.
	pub fn from_status(status: u16) -> Self {
		match status {
			200 => Self::Reachable,
			403 => Self::Blocked,
			_ => Self::Unexpected,
		}
	}

	/// Human-readable one-liner for logs and console output.
	pub fn describe(&self) -> &'static str {
		match self {
			Self::Reachable => "Success: Spotify token endpoint is reachable.",
			Self::Blocked => "Forbidden: Spotify token endpoint is blocked from this host.",
			Self::Unexpected => "Unexpected response from the Spotify token endpoint.",
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn statuses_map_onto_verdicts() {
		assert_eq!(ProbeVerdict::from_status(200), ProbeVerdict::Reachable);
		assert_eq!(ProbeVerdict::from_status(403), ProbeVerdict::Blocked);
		assert_eq!(ProbeVerdict::from_status(404), ProbeVerdict::Unexpected);
		assert_eq!(ProbeVerdict::from_status(500), ProbeVerdict::Unexpected);
		assert_eq!(ProbeVerdict::from_status(429), ProbeVerdict::Unexpected);
	}
}
