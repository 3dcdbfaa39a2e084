//! Persisted token entries and the cookie options that shape them.

// crates.io
use time::PrimitiveDateTime;
// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Cookie name used when none is configured.
pub const DEFAULT_COOKIE_NAME: &str = "auth_token";
/// Fixed lifetime applied on every write (7 days).
pub const DEFAULT_MAX_AGE: Duration = Duration::seconds(60 * 60 * 24 * 7);

/// Same-site scoping recorded alongside a stored token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SameSite {
	/// Sent only with same-site requests.
	#[default]
	Strict,
	/// Sent with same-site requests and top-level navigations.
	Lax,
	/// Sent with every request.
	None,
}
impl SameSite {
	/// Returns the attribute value as written in a `Set-Cookie` header.
	pub const fn as_str(self) -> &'static str {
		match self {
			SameSite::Strict => "Strict",
			SameSite::Lax => "Lax",
			SameSite::None => "None",
		}
	}
}
impl Display for SameSite {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Name, lifetime, and scoping applied whenever the token is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
	/// Storage key for the token.
	pub name: String,
	/// Lifetime measured from the most recent write.
	pub max_age: Duration,
	/// Same-site scoping.
	pub same_site: SameSite,
}
impl CookieOptions {
	/// Overrides the storage key.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();

		self
	}

	/// Overrides the lifetime; negative values clamp to zero.
	pub fn with_max_age(mut self, max_age: Duration) -> Self {
		self.max_age = if max_age.is_negative() { Duration::ZERO } else { max_age };

		self
	}

	/// Overrides the same-site scoping.
	pub fn with_same_site(mut self, same_site: SameSite) -> Self {
		self.same_site = same_site;

		self
	}
}
impl Default for CookieOptions {
	fn default() -> Self {
		Self {
			name: DEFAULT_COOKIE_NAME.into(),
			max_age: DEFAULT_MAX_AGE,
			same_site: SameSite::Strict,
		}
	}
}

/// A single stored token together with its expiry metadata.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
	/// Storage key the entry lives under.
	pub name: String,
	/// Bearer token value; callers must avoid logging it.
	pub value: TokenSecret,
	/// Instant of the write that produced this entry.
	pub issued_at: OffsetDateTime,
	/// Instant after which storage must stop returning the entry.
	pub expires_at: OffsetDateTime,
	/// Same-site scoping recorded at write time.
	pub same_site: SameSite,
}
impl StoredToken {
	/// Stamps `value` with the current clock.
	pub fn issue(value: impl Into<String>, options: &CookieOptions) -> Self {
		Self::issue_at(value, options, OffsetDateTime::now_utc())
	}

	/// Stamps `value` as written at `instant`.
	///
	/// Lifetimes reaching past the representable range saturate at the latest instant.
	pub fn issue_at(
		value: impl Into<String>,
		options: &CookieOptions,
		instant: OffsetDateTime,
	) -> Self {
		Self {
			name: options.name.clone(),
			value: TokenSecret::new(value),
			issued_at: instant,
			expires_at: instant
				.checked_add(options.max_age)
				.unwrap_or(PrimitiveDateTime::MAX.assume_utc()),
			same_site: options.same_site,
		}
	}

	/// Returns `true` if the entry has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the entry is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Lifetime granted at write time.
	pub fn max_age(&self) -> Duration {
		self.expires_at - self.issued_at
	}
}
impl Debug for StoredToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StoredToken")
			.field("name", &self.name)
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("same_site", &self.same_site)
			.finish()
	}
}
