//! Storage contracts and built-in backends for the persisted bearer token.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::StoredToken};

/// Boxed future returned by [`TokenStorage`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Key-value persistence for named token entries.
///
/// Backends own expiry enforcement: [`load`](TokenStorage::load) must never hand out an entry
/// whose `expires_at` has passed, and should drop such entries when it encounters them.
pub trait TokenStorage
where
	Self: Send + Sync,
{
	/// Fetches the live entry stored under `name`, if present.
	fn load<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>>;

	/// Persists or replaces the entry stored under `token.name`.
	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()>;

	/// Deletes the entry stored under `name`, returning it when one existed.
	fn remove<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>>;
}

/// Error type produced by [`TokenStorage`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
