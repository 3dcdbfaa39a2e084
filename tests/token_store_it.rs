// std
use std::{env, fs, process, sync::Arc};
// crates.io
use time::{Duration, OffsetDateTime};
// self
use bearer_client::{
	auth::{CookieOptions, SameSite, StoredToken, TokenStore},
	store::{FileStore, MemoryStore, TokenStorage},
};

fn temp_path(tag: &str) -> std::path::PathBuf {
	env::temp_dir().join(format!(
		"bearer_client_token_store_{tag}_{}_{}.json",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	))
}

#[tokio::test]
async fn is_authenticated_tracks_set_and_clear() {
	let storage: Arc<dyn TokenStorage> = Arc::new(MemoryStore::default());
	let tokens = TokenStore::new(storage);

	tokens.set_token("abc").await.expect("Setting a token should succeed.");

	assert!(tokens.is_authenticated().await.expect("Store should be readable."));

	tokens.clear_token().await.expect("Clearing a token should succeed.");

	assert!(!tokens.is_authenticated().await.expect("Store should be readable."));
	assert!(tokens.stored().await.expect("Store should be readable.").is_none());
}

#[tokio::test]
async fn expired_token_is_not_authenticated() {
	let backend = Arc::new(MemoryStore::default());
	let storage: Arc<dyn TokenStorage> = backend.clone();
	let tokens = TokenStore::new(storage);
	let written = OffsetDateTime::now_utc() - Duration::days(7) - Duration::seconds(1);

	backend
		.save(StoredToken::issue_at("old", tokens.options(), written))
		.await
		.expect("Saving an aged token should succeed.");

	assert!(!tokens.is_authenticated().await.expect("Store should be readable."));
	assert!(tokens.token().await.expect("Store should be readable.").is_none());
}

#[tokio::test]
async fn file_store_survives_restart() {
	let path = temp_path("restart");
	let options = CookieOptions::default().with_same_site(SameSite::Lax);

	{
		let storage: Arc<dyn TokenStorage> =
			Arc::new(FileStore::open(&path).expect("Failed to open file store snapshot."));
		let tokens = TokenStore::with_options(storage, options.clone());

		tokens.set_token("persisted").await.expect("Setting a token should succeed.");
	}

	let storage: Arc<dyn TokenStorage> =
		Arc::new(FileStore::open(&path).expect("Failed to reopen file store snapshot."));
	let tokens = TokenStore::with_options(storage, options);
	let stored = tokens
		.stored()
		.await
		.expect("Store should be readable.")
		.expect("Token should survive a reopen.");

	assert_eq!(stored.value.expose(), "persisted");
	assert_eq!(stored.same_site, SameSite::Lax);
	assert_eq!(stored.max_age(), Duration::days(7));

	tokens.clear_token().await.expect("Clearing a token should succeed.");

	let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

	assert!(reopened.load("auth_token").await.expect("Load should succeed.").is_none());

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
	});
}
