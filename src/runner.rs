//! One-shot scenario runners: transcript to the run log, summary to the console.
//!
//! Probe failures are terminal but not fatal to the runner: they are written to
//! the log, rendered, and the run still counts as completed. Only log-file I/O
//! errors propagate to the binaries.

// std
use std::io;
// self
use crate::{
	_prelude::*,
	auth::TokenCache,
	config::{CredentialResolver, ProbeConfig},
	logfile::RunLog,
	probe::ConnectivityProbe,
	render::{self, ReportRenderer, TokenReport},
};

/// Runs the client-credentials token exchange scenario.
pub async fn run_token_probe(
	config: ProbeConfig,
	resolver: CredentialResolver,
	log: &mut RunLog,
	renderer: &dyn ReportRenderer,
) -> io::Result<()> {
	log.separator()?;
	log.line(&format!("Requesting access token from {}", config.token_endpoint))?;

	let mut cache = match TokenCache::new(config, resolver) {
		Ok(cache) => cache,
		Err(error) => return fail(log, renderer, error.into()),
	};

	match cache.access_token(true).await {
		Ok((token, duration)) => {
			let report = TokenReport {
				token_preview: token.preview(),
				seconds_until_expiry: cache.seconds_until_expiry(),
				request_duration: duration,
				log_path: log.path().to_path_buf(),
			};

			log.line("Success: Spotify token endpoint is accessible.")?;
			log.line(&format!("Token (preview): {}", report.token_preview))?;
			log.line(&format!("Approx. seconds until expiry: {}", report.seconds_until_expiry))?;
			log.line(&format!("Request time: {}", render::format_duration(duration)))?;

			renderer.render_token_report(&report);

			Ok(())
		},
		Err(error) => fail(log, renderer, error),
	}
}

/// Runs the unauthenticated GET reachability scenario.
pub async fn run_connectivity_probe(
	config: ProbeConfig,
	log: &mut RunLog,
	renderer: &dyn ReportRenderer,
) -> io::Result<()> {
	log.separator()?;
	log.line(&format!("Sending GET request to {}", config.token_endpoint))?;

	let probe = match ConnectivityProbe::new(config) {
		Ok(probe) => probe,
		Err(error) => return fail(log, renderer, error.into()),
	};

	match probe.run().await {
		Ok(report) => {
			log.line(&format!("Status code: {}", report.status))?;
			log.line(&format!("Response time: {}", render::format_duration(report.duration)))?;
			log.line("Response headers:")?;

			for (name, value) in &report.headers {
				log.line(&format!("  {name}: {value}"))?;
			}

			log.line(report.verdict.describe())?;

			if let Some(body) = &report.body_preview {
				log.line(&format!("Body (preview): {body}"))?;
			}

			renderer.render_probe_report(&report, log.path());

			Ok(())
		},
		Err(error) => fail(log, renderer, error.into()),
	}
}

/// Logs a terminal failure with its source chain, then renders it.
fn fail(log: &mut RunLog, renderer: &dyn ReportRenderer, error: Error) -> io::Result<()> {
	tracing::error!(%error, "probe run failed");
	log.line(&format!("Run failed: {error}"))?;

	let mut source = StdError::source(&error);

	while let Some(cause) = source {
		log.line(&format!("Caused by: {cause}"))?;

		source = cause.source();
	}

	renderer.render_failure(&error, log.path());

	Ok(())
}
