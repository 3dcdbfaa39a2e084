//! Thread-safe in-memory [`TokenStorage`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::StoredToken,
	store::{StoreFuture, TokenStorage},
};

type StoreMap = Arc<RwLock<HashMap<String, StoredToken>>>;

/// Storage backend that keeps entries in-process; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn load_now(map: StoreMap, name: String, now: OffsetDateTime) -> Option<StoredToken> {
		let mut guard = map.write();

		if guard.get(&name).is_some_and(|entry| entry.is_expired_at(now)) {
			guard.remove(&name);

			return None;
		}

		guard.get(&name).cloned()
	}
}
impl TokenStorage for MemoryStore {
	fn load<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>> {
		let map = self.0.clone();
		let name = name.to_owned();

		Box::pin(async move { Ok(Self::load_now(map, name, OffsetDateTime::now_utc())) })
	}

	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(token.name.clone(), token);

			Ok(())
		})
	}

	fn remove<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>> {
		let map = self.0.clone();
		let name = name.to_owned();

		Box::pin(async move { Ok(map.write().remove(&name)) })
	}
}
