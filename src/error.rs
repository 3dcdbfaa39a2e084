//! Client-level error types shared across configuration, request composition, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error raised before a request reaches the transport.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request composition problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Configuration and request composition failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No API base was configured.
	#[error("API base URL is not configured.")]
	MissingApiBase,
	/// Request timeout must be strictly positive.
	#[error("Request timeout must be positive.")]
	InvalidTimeout,
	/// Endpoint paths must not be empty.
	#[error("Endpoint path cannot be empty.")]
	EmptyEndpoint,
	/// The joined base + endpoint is not a valid absolute URL.
	#[error("`{url}` is not a valid request URL.")]
	InvalidUrl {
		/// The rejected URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be serialized.")]
	Body(#[source] serde_json::Error),
	/// Configuration document could not be parsed.
	#[error("Configuration is malformed.")]
	Parse(#[source] serde_path_to_error::Error<serde_json::Error>),
	/// Configuration environment variable carried an unusable value.
	#[error("Environment variable `{name}` has an invalid value.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Outcome of a failed [`ApiClient`](crate::client::ApiClient) call.
///
/// Transport failures are handed back exactly as the transport produced them; nothing is
/// classified, retried, or rewrapped.
#[derive(Debug, ThisError)]
pub enum ClientError<E>
where
	E: 'static + StdError,
{
	/// The request never left the client.
	#[error(transparent)]
	Local(#[from] Error),
	/// The transport reported a failure (network error or non-success response).
	#[error(transparent)]
	Transport(E),
}
impl<E> ClientError<E>
where
	E: 'static + StdError,
{
	/// Returns the transport error when the failure came from the transport.
	pub fn transport(&self) -> Option<&E> {
		match self {
			Self::Transport(e) => Some(e),
			Self::Local(_) => None,
		}
	}

	/// Consumes the error and returns the transport error, if any.
	pub fn into_transport(self) -> Option<E> {
		match self {
			Self::Transport(e) => Some(e),
			Self::Local(_) => None,
		}
	}
}
impl<E> From<ConfigError> for ClientError<E>
where
	E: 'static + StdError,
{
	fn from(e: ConfigError) -> Self {
		Self::Local(e.into())
	}
}
impl<E> From<crate::store::StoreError> for ClientError<E>
where
	E: 'static + StdError,
{
	fn from(e: crate::store::StoreError) -> Self {
		Self::Local(e.into())
	}
}
