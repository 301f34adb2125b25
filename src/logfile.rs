//! Timestamped run logs, one file per run.
//!
//! The log file is the source of truth for a run: every outcome path writes to
//! it, and the absence of an entry is itself a bug. The handle is an explicit
//! value passed into logging calls rather than ambient global state; the
//! underlying file is released when the handle drops.

// std
use std::{
	fs::{self, File, OpenOptions},
	io::{self, Write},
	path::{Path, PathBuf},
};
// crates.io
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// Directory the run logs live in, created on demand.
pub const DEFAULT_LOG_DIR: &str = "Log";

const FILE_STAMP: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Append-only handle to the current run's log file.
#[derive(Debug)]
pub struct RunLog {
	path: PathBuf,
	file: File,
}
impl RunLog {
	/// Creates the log directory on demand and opens a fresh timestamped file.
	pub fn create(dir: impl AsRef<Path>) -> io::Result<Self> {
		let dir = dir.as_ref();

		fs::create_dir_all(dir)?;

		let stamp = now().format(FILE_STAMP).map_err(io::Error::other)?;
		let path = dir.join(format!("spotify_probe_{stamp}.log"));
		let file = OpenOptions::new().append(true).create(true).open(&path)?;

		Ok(Self { path, file })
	}

	/// Location of the log file for this run.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Appends one `[YYYY-MM-DD HH:MM:SS] message` line and flushes it.
	pub fn line(&mut self, message: &str) -> io::Result<()> {
		let stamp = now().format(LINE_STAMP).map_err(io::Error::other)?;

		writeln!(self.file, "[{stamp}] {message}")?;
		self.file.flush()
	}

	/// Appends a 40-character rule separating runs or sections.
	pub fn separator(&mut self) -> io::Result<()> {
		self.line(&"=".repeat(40))
	}
}

fn now() -> OffsetDateTime {
	// Local time when the platform can determine the UTC offset soundly.
	OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
