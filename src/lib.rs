//! One-shot connectivity probe for the Spotify Web API: check token-endpoint reachability,
//! exercise the client-credentials grant through an expiry-aware token cache, and record
//! every run to a timestamped log file with a styled console summary.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod logfile;
pub mod probe;
pub mod render;
pub mod runner;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		path::{Path, PathBuf},
		time::Duration as StdDuration,
	};

	pub use reqwest::Client as ReqwestClient;
	pub use serde::Deserialize;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;

// The binaries under `src/bin` own the async runtime and subscriber wiring.
use {tokio as _, tracing_subscriber as _};
#[cfg(test)] use httpmock as _;
