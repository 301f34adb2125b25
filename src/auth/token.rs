//! Cached token model with skew-adjusted expiry.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token issued by a successful exchange, paired with its expiry instant.
///
/// The token string and expiry are only ever written together by
/// [`CachedToken::issue`]; there is no partial-update path.
#[derive(Clone, Debug)]
pub struct CachedToken {
	/// Opaque bearer secret returned by the token endpoint.
	pub access_token: TokenSecret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Instant after which the token must be treated as invalid; already
	/// discounted by the clock-skew margin.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Stamps a freshly exchanged token.
	///
	/// The expiry is `issued_at + expires_in - clock_skew_margin` so the token is
	/// never used within its last margin-seconds of nominal validity.
	pub fn issue(
		access_token: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
		clock_skew_margin: Duration,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			issued_at,
			expires_at: issued_at + expires_in - clock_skew_margin,
		}
	}

	/// Returns `true` iff `instant` is strictly before the adjusted expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Convenience helper that checks validity against the current UTC instant.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Whole seconds remaining before expiry at `instant`; never negative.
	pub fn seconds_until_expiry_at(&self, instant: OffsetDateTime) -> u64 {
		let remaining = self.expires_at - instant;

		u64::try_from(remaining.whole_seconds()).unwrap_or(0)
	}

	/// Whole seconds remaining before expiry relative to the current clock.
	pub fn seconds_until_expiry(&self) -> u64 {
		self.seconds_until_expiry_at(OffsetDateTime::now_utc())
	}
}
