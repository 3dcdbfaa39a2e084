//! Request descriptors composed by the client and consumed by transports.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Header name carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";
/// Header name announcing a JSON body.
pub const CONTENT_TYPE: &str = "Content-Type";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the canonical upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(value: Method) -> Self {
		match value {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// A fully composed request, built and consumed within a single client call.
///
/// Header names are kept exactly as inserted; the client only ever inserts
/// [`AUTHORIZATION`] and [`CONTENT_TYPE`].
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute request target.
	pub url: Url,
	/// Derived headers.
	pub headers: BTreeMap<String, String>,
	/// JSON payload, if any.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Creates a request with no headers and no body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: BTreeMap::new(), body: None }
	}

	/// Joins `endpoint` onto `base` by plain concatenation and parses the result.
	pub fn target(base: &str, endpoint: &str) -> Result<Url, ConfigError> {
		if endpoint.is_empty() {
			return Err(ConfigError::EmptyEndpoint);
		}

		let joined = format!("{base}{endpoint}");

		Url::parse(&joined).map_err(|source| ConfigError::InvalidUrl { url: joined, source })
	}

	/// Attaches `Authorization: Bearer <token>` when a token is present.
	pub fn bearer(mut self, token: Option<&TokenSecret>) -> Self {
		if let Some(token) = token {
			self.headers.insert(AUTHORIZATION.into(), format!("Bearer {}", token.expose()));
		}

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		let value = serde_json::to_value(body).map_err(ConfigError::Body)?;

		self.headers.insert(CONTENT_TYPE.into(), JSON_CONTENT_TYPE.into());
		self.body = Some(value);

		Ok(self)
	}

	/// Returns the header value stored under `name`, if any.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}

	/// Encodes the body for the wire as compact JSON.
	pub fn body_bytes(&self) -> Option<Vec<u8>> {
		self.body.as_ref().map(|v| v.to_string().into_bytes())
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers: BTreeMap<_, _> = self
			.headers
			.iter()
			.map(|(k, v)| {
				let shown = if k == AUTHORIZATION { "<redacted>" } else { v.as_str() };

				(k.as_str(), shown)
			})
			.collect();

		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body", &self.body)
			.finish()
	}
}
