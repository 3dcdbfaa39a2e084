//! Demonstrates a login/logout round trip: a token written to a file-backed store signs the
//! next request, and clearing it makes the following request anonymous.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use bearer_client::{
	auth::TokenStore,
	client::ApiClient,
	config::ClientConfig,
	store::{FileStore, TokenStorage},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/items").header("authorization", "Bearer demo-token");
			then.status(201).json_body(json!({ "id": 1, "name": "x" }));
		})
		.await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/items").header_missing("authorization");
			then.status(200).json_body(json!([]));
		})
		.await;
	let path = env::temp_dir().join("bearer_client_login_flow.json");
	let storage: Arc<dyn TokenStorage> = Arc::new(FileStore::open(&path)?);
	let tokens = TokenStore::new(storage);
	let config = ClientConfig::builder().api_base(server.url("/api")).build()?;
	let client = ApiClient::new(config, tokens.clone())?;

	tokens.set_token("demo-token").await?;

	let created = client.post("/items", &json!({ "name": "x" })).await?;

	println!("Created item with status {}.", created.status());

	tokens.clear_token().await?;

	let listed = client.get("/items").await?;

	println!(
		"Listed items anonymously with status {} (authenticated: {}).",
		listed.status(),
		tokens.is_authenticated().await?
	);

	create_mock.assert_async().await;
	list_mock.assert_async().await;

	Ok(())
}
