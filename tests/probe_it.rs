// crates.io
use httpmock::prelude::*;
// self
use spotify_probe::{
	config::ProbeConfig,
	error::AuthError,
	probe::{self, ConnectivityProbe, ProbeVerdict},
	url::Url,
};

fn probe_for(server: &MockServer) -> ConnectivityProbe {
	let config = ProbeConfig::new(
		Url::parse(&server.url("/api/token")).expect("Mock token endpoint should parse."),
	);

	ConnectivityProbe::new(config).expect("Probe should build its HTTP client.")
}

#[tokio::test]
async fn reachable_endpoint_yields_a_success_verdict() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/token").header("user-agent", probe::USER_AGENT);
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let report = probe_for(&server).run().await.expect("Probe request should succeed.");

	assert_eq!(report.status, 200);
	assert_eq!(report.verdict, ProbeVerdict::Reachable);
	assert_eq!(report.body_preview, None);
	assert!(
		report
			.headers
			.iter()
			.any(|(name, value)| name == "content-type" && value == "application/json")
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn forbidden_endpoint_yields_a_blocked_verdict() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/token");
			then.status(403).body("blocked by policy");
		})
		.await;
	let report = probe_for(&server).run().await.expect("Probe request should succeed.");

	assert_eq!(report.status, 403);
	assert_eq!(report.verdict, ProbeVerdict::Blocked);
	assert_eq!(report.body_preview, None);
}

#[tokio::test]
async fn unexpected_status_captures_a_bounded_body_preview() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/token");
			then.status(503).body("overloaded ".repeat(100));
		})
		.await;
	let report = probe_for(&server).run().await.expect("Probe request should succeed.");

	assert_eq!(report.status, 503);
	assert_eq!(report.verdict, ProbeVerdict::Unexpected);

	let preview = report.body_preview.expect("Unexpected statuses should carry a preview.");

	assert!(preview.chars().count() <= 200);
	assert!(preview.starts_with("overloaded"));
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_a_network_error() {
	// Port 1 is reserved and closed on loopback; the connection is refused.
	let config = ProbeConfig::new(
		Url::parse("http://127.0.0.1:1/api/token").expect("Static URL should parse."),
	);
	let probe = ConnectivityProbe::new(config).expect("Probe should build its HTTP client.");
	let err = probe.run().await.expect_err("Refused connections should surface.");

	assert!(matches!(err, AuthError::Network { .. }));
}
