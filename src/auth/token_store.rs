//! Single point of truth for the current bearer token.

// self
use crate::{
	_prelude::*,
	auth::{CookieOptions, StoredToken, TokenSecret},
	obs::{self, TokenEvent},
	store::{StoreError, TokenStorage},
};

/// Proxies reads and writes of one named token entry to a [`TokenStorage`] backend.
///
/// Nothing is cached locally: every accessor consults storage, so values always reflect the
/// most recent write and the backend's expiry enforcement. Cloning shares the same backend.
#[derive(Clone)]
pub struct TokenStore {
	storage: Arc<dyn TokenStorage>,
	options: Arc<CookieOptions>,
}
impl TokenStore {
	/// Creates a store using the default `auth_token` cookie options.
	pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
		Self::with_options(storage, CookieOptions::default())
	}

	/// Creates a store with custom cookie options.
	pub fn with_options(storage: Arc<dyn TokenStorage>, options: CookieOptions) -> Self {
		Self { storage, options: Arc::new(options) }
	}

	/// Options applied on every write.
	pub fn options(&self) -> &CookieOptions {
		&self.options
	}

	/// Writes `value`, restarting the expiry window. An empty value clears the token instead.
	pub async fn set_token(&self, value: impl Into<String>) -> Result<(), StoreError> {
		let value = value.into();

		if value.is_empty() {
			return self.clear_token().await;
		}

		self.storage.save(StoredToken::issue(value, &self.options)).await?;
		obs::trace_token_event(TokenEvent::Stored, &self.options.name);
		obs::record_token_event(TokenEvent::Stored);

		Ok(())
	}

	/// Removes the token.
	pub async fn clear_token(&self) -> Result<(), StoreError> {
		self.storage.remove(&self.options.name).await?;
		obs::trace_token_event(TokenEvent::Cleared, &self.options.name);
		obs::record_token_event(TokenEvent::Cleared);

		Ok(())
	}

	/// Returns the live entry with its expiry metadata.
	pub async fn stored(&self) -> Result<Option<StoredToken>, StoreError> {
		self.storage.load(&self.options.name).await
	}

	/// Returns the current token value, if one is stored and non-empty.
	pub async fn token(&self) -> Result<Option<TokenSecret>, StoreError> {
		let stored = self.stored().await?;

		Ok(stored.map(|entry| entry.value).filter(|value| !value.is_empty()))
	}

	/// Returns `true` if and only if a non-empty token is currently stored.
	pub async fn is_authenticated(&self) -> Result<bool, StoreError> {
		Ok(self.token().await?.is_some())
	}
}
impl Debug for TokenStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStore").field("options", &self.options).finish()
	}
}
