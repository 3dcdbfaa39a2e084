//! Request client that joins endpoints onto the configured base and signs requests with the
//! current bearer token.

// self
use crate::{
	_prelude::*,
	auth::TokenStore,
	config::ClientConfig,
	error::{ClientError, ConfigError},
	http::HttpTransport,
	obs::{self, RequestOutcome, RequestSpan},
	request::{ApiRequest, Method},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Result of an [`ApiClient`] call over transport `T`.
pub type ClientResult<T> =
	Result<<T as HttpTransport>::Response, ClientError<<T as HttpTransport>::Error>>;

/// Dispatches `GET`/`POST`/`PATCH`/`DELETE` calls to `{api_base}{endpoint}`.
///
/// Every call reads the token fresh from the [`TokenStore`] and, when one is present, sends
/// exactly one `Authorization: Bearer <token>` header. The transport's response or error is
/// returned as-is: there are no retries and no status interpretation at this layer.
pub struct ApiClient<T>
where
	T: HttpTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Base URL and timeout settings.
	pub config: ClientConfig,
	/// Token source consulted on each call.
	pub tokens: TokenStore,
}
impl<T> ApiClient<T>
where
	T: HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		tokens: TokenStore,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self { transport: transport.into(), config, tokens }
	}

	/// Issues `GET {api_base}{endpoint}`.
	pub async fn get(&self, endpoint: &str) -> ClientResult<T> {
		self.request(Method::Get, endpoint, None::<&()>).await
	}

	/// Issues `POST {api_base}{endpoint}` with `body` encoded as JSON.
	pub async fn post<B>(&self, endpoint: &str, body: &B) -> ClientResult<T>
	where
		B: ?Sized + Serialize,
	{
		self.request(Method::Post, endpoint, Some(body)).await
	}

	/// Issues `PATCH {api_base}{endpoint}` with `body` encoded as JSON.
	pub async fn patch<B>(&self, endpoint: &str, body: &B) -> ClientResult<T>
	where
		B: ?Sized + Serialize,
	{
		self.request(Method::Patch, endpoint, Some(body)).await
	}

	/// Issues `DELETE {api_base}{endpoint}`.
	pub async fn del(&self, endpoint: &str) -> ClientResult<T> {
		self.request(Method::Delete, endpoint, None::<&()>).await
	}

	/// Composes and dispatches a request with an arbitrary method and optional body.
	pub async fn request<B>(
		&self,
		method: Method,
		endpoint: &str,
		body: Option<&B>,
	) -> ClientResult<T>
	where
		B: ?Sized + Serialize,
	{
		let span = RequestSpan::new(method, "request");

		span.instrument(async move {
			obs::record_request_outcome(method, RequestOutcome::Attempt);

			let result = self.dispatch(method, endpoint, body).await;
			let outcome =
				if result.is_ok() { RequestOutcome::Success } else { RequestOutcome::Failure };

			obs::record_request_outcome(method, outcome);

			result
		})
		.await
	}

	/// Builds the request a call would send, without sending it.
	pub async fn compose<B>(
		&self,
		method: Method,
		endpoint: &str,
		body: Option<&B>,
	) -> Result<ApiRequest>
	where
		B: ?Sized + Serialize,
	{
		let url = self.endpoint_url(endpoint)?;
		let mut request = ApiRequest::new(method, url);

		if let Some(body) = body {
			request = request.json(body)?;
		}

		let token = self.tokens.token().await?;

		Ok(request.bearer(token.as_ref()))
	}

	/// Resolves `endpoint` against the configured base by plain concatenation.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		ApiRequest::target(&self.config.api_base, endpoint)
	}

	async fn dispatch<B>(
		&self,
		method: Method,
		endpoint: &str,
		body: Option<&B>,
	) -> ClientResult<T>
	where
		B: ?Sized + Serialize,
	{
		let request = self.compose(method, endpoint, body).await?;

		self.transport.execute(request).await.map_err(ClientError::Transport)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client that provisions its own reqwest transport from `config`.
	pub fn new(config: ClientConfig, tokens: TokenStore) -> Result<Self, ConfigError> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, tokens, transport))
	}
}
impl<T> Clone for ApiClient<T>
where
	T: HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			config: self.config.clone(),
			tokens: self.tokens.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("tokens", &self.tokens)
			.finish()
	}
}
