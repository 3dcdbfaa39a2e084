//! Transport seam between the client and an HTTP stack.
//!
//! The client composes an [`ApiRequest`] and hands it to an [`HttpTransport`]; whatever the
//! transport resolves to (response or error) goes back to the caller untouched. Custom stacks,
//! test doubles included, only need to implement [`HttpTransport::execute`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, request::ApiRequest};
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of dispatching composed requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared across
/// clones of the client, and the futures they return must be `Send` so callers can spawn them
/// on multi-threaded executors.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Value produced for a completed exchange.
	type Response: Send;
	/// Concrete error emitted by the underlying transport.
	type Error: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the transport's own outcome.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Response, Self::Error>;
}

/// Reqwest-backed transport.
///
/// Mirrors the browser fetch helper it stands in for: responses with a 4xx/5xx status are
/// reported as [`ReqwestError`]s unless [`ReqwestTransport::allow_error_status`] is set.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	error_for_status: bool,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, error_for_status: true }
	}

	/// Builds a client honoring the configured timeout.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = config.timeout {
			let timeout = std::time::Duration::try_from(timeout)
				.map_err(|_| ConfigError::InvalidTimeout)?;

			builder = builder.timeout(timeout);
		}

		Ok(Self::with_client(builder.build()?))
	}

	/// Hands back 4xx/5xx responses as successes instead of errors.
	pub fn allow_error_status(mut self) -> Self {
		self.error_for_status = false;

		self
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		Self::with_client(ReqwestClient::default())
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	type Error = ReqwestError;
	type Response = reqwest::Response;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Response, Self::Error> {
		let mut builder = self.client.request(request.method.into(), request.url.clone());

		for (name, value) in &request.headers {
			builder = builder.header(name, value);
		}
		if let Some(body) = request.body_bytes() {
			builder = builder.body(body);
		}

		let error_for_status = self.error_for_status;

		Box::pin(async move {
			let response = builder.send().await?;

			if error_for_status { response.error_for_status() } else { Ok(response) }
		})
	}
}
