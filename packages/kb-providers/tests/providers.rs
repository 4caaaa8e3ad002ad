use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use kb_providers::Error;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		kb_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn merges_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-team".to_string(), Value::String("notes".to_string()));

	let headers =
		kb_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("x-team").expect("Missing default header."), "notes");
}

#[test]
fn rejects_non_string_default_header() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), Value::from(3));

	let err = kb_providers::auth_headers("secret", &defaults)
		.expect_err("Expected non-string header rejection.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn empty_input_skips_the_network() {
	let cfg = kb_config::EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "key".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "m".to_string(),
		dimensions: 3,
		timeout_ms: 100,
		default_headers: Map::new(),
	};
	let vectors = kb_providers::embedding::embed(&cfg, &[]).await.expect("Empty input must succeed.");

	assert!(vectors.is_empty());
}
