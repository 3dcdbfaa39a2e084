//! File-backed [`TokenStorage`] that keeps the token across process restarts.

// std
use std::{
	ffi::OsString,
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::StoredToken,
	store::{StoreError, StoreFuture, TokenStorage},
};

type Snapshot = HashMap<String, StoredToken>;

/// Persists entries to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Snapshot>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn tmp_path(&self) -> PathBuf {
		let mut raw = OsString::from(self.path.as_os_str());

		raw.push(".tmp");

		PathBuf::from(raw)
	}

	fn persist_locked(&self, contents: &Snapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let tmp_path = self.tmp_path();

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenStorage for FileStore {
	fn load<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();

			if guard.get(name).is_some_and(|entry| entry.is_expired_at(now)) {
				let mut next = guard.clone();

				next.remove(name);
				self.persist_locked(&next)?;
				*guard = next;

				return Ok(None);
			}

			Ok(guard.get(name).cloned())
		})
	}

	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();

			next.insert(token.name.clone(), token);
			self.persist_locked(&next)?;
			*guard = next;

			Ok(())
		})
	}

	fn remove<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<StoredToken>> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			if !guard.contains_key(name) {
				return Ok(None);
			}

			let mut next = guard.clone();
			let removed = next.remove(name);

			self.persist_locked(&next)?;
			*guard = next;

			Ok(removed)
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;
	use crate::auth::CookieOptions;

	fn temp_path(tag: &str) -> PathBuf {
		let unique = format!(
			"bearer_client_file_store_{tag}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path("reload");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let token = StoredToken::issue("tok123", &CookieOptions::default());
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.save(token.clone())).expect("Failed to save token to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");
		let fetched = rt
			.block_on(reopened.load("auth_token"))
			.expect("Failed to load token from file store.")
			.expect("File store lost token after reopen.");

		assert_eq!(fetched, token);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn remove_is_persisted() {
		let path = temp_path("remove");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.save(StoredToken::issue("tok123", &CookieOptions::default())))
			.expect("Failed to save token to file store.");

		let removed = rt.block_on(store.remove("auth_token")).expect("Remove should succeed.");

		assert!(removed.is_some());

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(rt.block_on(reopened.load("auth_token")).expect("Load should succeed.").is_none());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn corrupt_snapshot_is_a_serialization_error() {
		let path = temp_path("corrupt");

		fs::write(&path, b"not json").expect("Failed to seed corrupt snapshot.");

		let err = FileStore::open(&path).expect_err("Corrupt snapshot should not open.");

		assert!(matches!(err, StoreError::Serialization { .. }));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn failed_persist_leaves_state_untouched() {
		let path = temp_path("failed_persist");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let tmp = store.tmp_path();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		fs::create_dir(&tmp).expect("Failed to block the temporary snapshot path.");

		let err = rt
			.block_on(store.save(StoredToken::issue("abc", &CookieOptions::default())))
			.expect_err("Save should fail while the temporary path is a directory.");

		assert!(matches!(err, StoreError::Backend { .. }));
		assert!(rt.block_on(store.load("auth_token")).expect("Load should succeed.").is_none());
		assert!(!path.exists());

		fs::remove_dir(&tmp).expect("Failed to unblock the temporary snapshot path.");
		rt.block_on(store.save(StoredToken::issue("abc", &CookieOptions::default())))
			.expect("Save should succeed once the path is clear.");
		fs::create_dir(&tmp).expect("Failed to block the temporary snapshot path.");
		rt.block_on(store.remove("auth_token"))
			.expect_err("Remove should fail while the temporary path is a directory.");

		let kept = rt
			.block_on(store.load("auth_token"))
			.expect("Load should succeed.")
			.expect("Failed remove should keep the entry in memory.");

		assert_eq!(kept.value.expose(), "abc");

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(rt.block_on(reopened.load("auth_token")).expect("Load should succeed.").is_some());

		fs::remove_dir(&tmp).expect("Failed to unblock the temporary snapshot path.");
		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn tmp_suffix_is_appended_to_the_full_name() {
		let path = temp_path("suffix").with_extension("tmp");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		assert_ne!(store.tmp_path(), path);
		assert!(store.tmp_path().to_string_lossy().ends_with(".tmp.tmp"));

		rt.block_on(store.save(StoredToken::issue("tok123", &CookieOptions::default())))
			.expect("Failed to save token to file store.");

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(rt.block_on(reopened.load("auth_token")).expect("Load should succeed.").is_some());
		assert!(!store.tmp_path().exists());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}
}
