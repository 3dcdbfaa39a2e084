//! Runtime configuration for [`ApiClient`](crate::client::ApiClient).
//!
//! The base URL is kept verbatim: endpoints are appended by plain concatenation, so whether the
//! base ends in `/` is the caller's decision. Configuration can be assembled with
//! [`ClientConfig::builder`], read from the process environment, or parsed from JSON.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable holding the API base URL.
pub const API_BASE_ENV: &str = "PUBLIC_API_BASE";
/// Environment variable holding the optional request timeout, in whole seconds.
pub const API_TIMEOUT_ENV: &str = "PUBLIC_API_TIMEOUT_SECS";

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// URL prefix every endpoint is appended to.
	pub api_base: String,
	/// Transport-level timeout applied to each request, if any.
	pub timeout: Option<Duration>,
}
impl ClientConfig {
	/// Creates a new builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads configuration from [`API_BASE_ENV`] and [`API_TIMEOUT_ENV`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Loads configuration through an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let mut builder = Self::builder();

		if let Some(base) = lookup(API_BASE_ENV) {
			builder = builder.api_base(base);
		}
		if let Some(raw) = lookup(API_TIMEOUT_ENV) {
			let secs = raw
				.trim()
				.parse::<i64>()
				.map_err(|_| ConfigError::InvalidEnv { name: API_TIMEOUT_ENV })?;

			builder = builder.timeout(Duration::seconds(secs));
		}

		builder.build()
	}

	/// Parses a JSON document such as
	/// `{"api_base": "https://api.example.com", "timeout_secs": 30}`.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);
		let file: ConfigFile = serde_path_to_error::deserialize(de).map_err(ConfigError::Parse)?;
		let mut builder = Self::builder();

		if let Some(base) = file.api_base {
			builder = builder.api_base(base);
		}
		if let Some(secs) = file.timeout_secs {
			builder = builder.timeout(Duration::seconds(secs));
		}

		builder.build()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
	/// URL prefix every endpoint is appended to.
	pub api_base: Option<String>,
	/// Optional per-request timeout.
	pub timeout: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Sets the API base URL.
	pub fn api_base(mut self, base: impl Into<String>) -> Self {
		self.api_base = Some(base.into());

		self
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Validates the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let api_base =
			self.api_base.filter(|b| !b.is_empty()).ok_or(ConfigError::MissingApiBase)?;

		Url::parse(&api_base)
			.map_err(|source| ConfigError::InvalidUrl { url: api_base.clone(), source })?;

		if self.timeout.is_some_and(|t| !t.is_positive()) {
			return Err(ConfigError::InvalidTimeout);
		}

		Ok(ClientConfig { api_base, timeout: self.timeout })
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	api_base: Option<String>,
	timeout_secs: Option<i64>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_keeps_base_verbatim() {
		let config = ClientConfig::builder()
			.api_base("https://api.example.com/v1/")
			.timeout(Duration::seconds(10))
			.build()
			.expect("Builder should accept an absolute base.");

		assert_eq!(config.api_base, "https://api.example.com/v1/");
		assert_eq!(config.timeout, Some(Duration::seconds(10)));
	}

	#[test]
	fn builder_rejects_missing_relative_and_bad_timeout() {
		assert!(matches!(ClientConfig::builder().build(), Err(ConfigError::MissingApiBase)));
		assert!(matches!(
			ClientConfig::builder().api_base("").build(),
			Err(ConfigError::MissingApiBase)
		));
		assert!(matches!(
			ClientConfig::builder().api_base("/api").build(),
			Err(ConfigError::InvalidUrl { .. })
		));
		assert!(matches!(
			ClientConfig::builder()
				.api_base("https://api.example.com")
				.timeout(Duration::ZERO)
				.build(),
			Err(ConfigError::InvalidTimeout)
		));
	}

	#[test]
	fn lookup_reads_both_variables() {
		let config = ClientConfig::from_lookup(|name| match name {
			API_BASE_ENV => Some("http://localhost:8080/api".into()),
			API_TIMEOUT_ENV => Some(" 15 ".into()),
			_ => None,
		})
		.expect("Lookup with both variables should build.");

		assert_eq!(config.api_base, "http://localhost:8080/api");
		assert_eq!(config.timeout, Some(Duration::seconds(15)));

		let err = ClientConfig::from_lookup(|name| match name {
			API_BASE_ENV => Some("http://localhost:8080/api".into()),
			API_TIMEOUT_ENV => Some("soon".into()),
			_ => None,
		})
		.expect_err("Non-numeric timeout should be rejected.");

		assert!(matches!(err, ConfigError::InvalidEnv { name: API_TIMEOUT_ENV }));
	}

	#[test]
	fn json_errors_point_at_the_field() {
		let config = ClientConfig::from_json_str(r#"{"api_base":"https://api.example.com"}"#)
			.expect("Minimal JSON config should parse.");

		assert_eq!(config.timeout, None);

		let raw = r#"{"api_base":"https://x.dev","timeout_secs":"ten"}"#;
		let err = ClientConfig::from_json_str(raw).expect_err("String timeout should be rejected.");

		match err {
			ConfigError::Parse(inner) => assert_eq!(inner.path().to_string(), "timeout_secs"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
