//! Console renderers for probe reports.
//!
//! Styled output is a capability, not a requirement: one availability check at
//! startup picks the [`StyledRenderer`] or the [`PlainRenderer`], and the plain
//! variant prints the same lines without escape codes so the probe stays usable
//! in minimal environments.

// std
use std::io::{IsTerminal, stdout};
// crates.io
use colored::Colorize;
// self
use crate::{
	_prelude::*,
	probe::{ProbeReport, ProbeVerdict},
};

/// Console-facing summary of a completed token exchange.
#[derive(Clone, Debug)]
pub struct TokenReport {
	/// Shortened token prefix safe for display.
	pub token_preview: String,
	/// Seconds left before the cached token must be refreshed.
	pub seconds_until_expiry: u64,
	/// Wall-clock duration of the token request.
	pub request_duration: StdDuration,
	/// Run log location holding the full transcript.
	pub log_path: PathBuf,
}

/// Renders run outcomes to the console.
pub trait ReportRenderer {
	/// Renders the summary of a successful token exchange.
	fn render_token_report(&self, report: &TokenReport);

	/// Renders the summary of a completed connectivity check.
	fn render_probe_report(&self, report: &ProbeReport, log_path: &Path);

	/// Renders a terminal failure with a pointer at the run log.
	fn render_failure(&self, error: &Error, log_path: &Path);
}

/// Picks the styled renderer when stdout is a terminal and `NO_COLOR` is unset.
pub fn detect() -> Box<dyn ReportRenderer> {
	if styling_available() { Box::new(StyledRenderer) } else { Box::new(PlainRenderer) }
}

fn styling_available() -> bool {
	std::env::var_os("NO_COLOR").is_none() && stdout().is_terminal()
}

/// Colored renderer backed by ANSI escape codes.
pub struct StyledRenderer;
impl ReportRenderer for StyledRenderer {
	fn render_token_report(&self, report: &TokenReport) {
		println!();
		println!("{}", "Spotify API Connectivity Test".bold().green());
		println!("{}", format!("{} Token exchange succeeded", "✓".green().bold()).bold());
		row("Token preview", &report.token_preview.yellow().to_string());
		row("Expires in", &format!("{} seconds", report.seconds_until_expiry));
		row("Request time", &format_duration(report.request_duration));
		row("Log file", &report.log_path.display().to_string().cyan().to_string());
		println!();
	}

	fn render_probe_report(&self, report: &ProbeReport, log_path: &Path) {
		let verdict = match report.verdict {
			ProbeVerdict::Reachable => format!("{} {}", "✓".green().bold(), report.verdict.describe()),
			ProbeVerdict::Blocked => format!("{} {}", "✗".red().bold(), report.verdict.describe()),
			ProbeVerdict::Unexpected =>
				format!("{} {}", "⚠".yellow().bold(), report.verdict.describe()),
		};

		println!();
		println!("{}", "Spotify API Connectivity Test".bold().green());
		println!("{verdict}");
		row("Status code", &report.status.to_string());
		row("Response time", &format_duration(report.duration));
		row("Log file", &log_path.display().to_string().cyan().to_string());
		println!();
	}

	fn render_failure(&self, error: &Error, log_path: &Path) {
		eprintln!();
		eprintln!("{}", "Spotify API Connectivity Test".bold().red());
		eprintln!("{} {}", "✗".red().bold(), "Run failed".red());
		eprintln!("  {}", error.to_string().red());

		let mut source = StdError::source(error);

		while let Some(cause) = source {
			eprintln!("  {} {cause}", "caused by:".dimmed());

			source = cause.source();
		}

		eprintln!("  {}{}", format!("{:<15}", "Log file").bold().magenta(), log_path.display().to_string().cyan());
		eprintln!();
	}
}

/// Escape-free renderer for pipes, dumb terminals, and `NO_COLOR` environments.
pub struct PlainRenderer;
impl ReportRenderer for PlainRenderer {
	fn render_token_report(&self, report: &TokenReport) {
		println!();
		println!("Spotify API Connectivity Test");
		println!("Token exchange succeeded");
		println!("  Token preview: {}", report.token_preview);
		println!("  Expires in: {} seconds", report.seconds_until_expiry);
		println!("  Request time: {}", format_duration(report.request_duration));
		println!("  Log file: {}", report.log_path.display());
		println!();
	}

	fn render_probe_report(&self, report: &ProbeReport, log_path: &Path) {
		println!();
		println!("Spotify API Connectivity Test");
		println!("{}", report.verdict.describe());
		println!("  Status code: {}", report.status);
		println!("  Response time: {}", format_duration(report.duration));
		println!("  Log file: {}", log_path.display());
		println!();
	}

	fn render_failure(&self, error: &Error, log_path: &Path) {
		eprintln!();
		eprintln!("Spotify API Connectivity Test");
		eprintln!("Run failed: {error}");

		let mut source = StdError::source(error);

		while let Some(cause) = source {
			eprintln!("  caused by: {cause}");

			source = cause.source();
		}

		eprintln!("  Log file: {}", log_path.display());
		eprintln!();
	}
}

fn row(label: &str, value: &str) {
	// Pad before colorizing so the escape codes do not eat into the column width.
	println!("  {}{value}", format!("{label:<15}").bold().magenta());
}

/// Seconds with millisecond precision, the way the transcript reports timings.
pub fn format_duration(duration: StdDuration) -> String {
	format!("{:.3} seconds", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn durations_render_with_millisecond_precision() {
		assert_eq!(format_duration(StdDuration::from_millis(1_234)), "1.234 seconds");
		assert_eq!(format_duration(StdDuration::ZERO), "0.000 seconds");
	}
}
