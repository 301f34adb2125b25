//! `spotify-probe`: one unauthenticated GET against the Spotify token endpoint,
//! classified and logged.

// std
use std::process::ExitCode;
// crates.io
use tracing_subscriber::EnvFilter;
// self
use spotify_probe::{
	config::ProbeConfig,
	logfile::{self, RunLog},
	render, runner,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	init_subscriber();

	let config = ProbeConfig::default();
	let mut log = match RunLog::create(logfile::DEFAULT_LOG_DIR) {
		Ok(log) => log,
		Err(error) => {
			eprintln!("failed to create the run log: {error}");

			return ExitCode::FAILURE;
		},
	};
	let renderer = render::detect();

	if let Err(error) = runner::run_connectivity_probe(config, &mut log, renderer.as_ref()).await {
		eprintln!("failed to write the run log: {error}");

		return ExitCode::FAILURE;
	}

	println!("Log has been saved to: {}", log.path().display());

	// The log file is the source of truth; a completed run exits 0 even when the
	// probe itself reported a failure.
	ExitCode::SUCCESS
}

fn init_subscriber() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();
}
