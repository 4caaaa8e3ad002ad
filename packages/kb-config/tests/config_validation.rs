use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use kb_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, replacement: Value) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");
	let table = root
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested section.");

	table.insert(key.to_string(), replacement);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("kb_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> kb_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = kb_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected a validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads_and_normalizes_api_base() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");
	let embedding = cfg.providers.embedding.expect("Sample config must configure embeddings.");

	assert_eq!(embedding.api_base, "http://127.0.0.1:11434");
	assert_eq!(embedding.dimensions, 384);
	assert_eq!(cfg.search.candidate_factor, 2);
	assert_eq!(cfg.snippet.note_max_chars, 200);
}

#[test]
fn search_and_snippet_sections_are_optional() {
	let payload = r#"
[service]
http_bind = "127.0.0.1:0"

[storage]
corpus_path = "corpus.json"
"#;
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert!(cfg.providers.embedding.is_none());
	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.default_limit, 10);
	assert_eq!(cfg.search.max_limit, 100);
	assert!((cfg.search.default_min_relevance - 0.3).abs() < f32::EPSILON);
	assert_eq!(cfg.snippet.document_max_chars, 300);
	assert_eq!(cfg.snippet.boundary_window_chars, 50);
}

#[test]
fn default_limit_must_not_exceed_max_limit() {
	expect_validation(
		sample_with("search", "default_limit", Value::Integer(500)),
		"search.default_limit must be between 1 and search.max_limit.",
	);
}

#[test]
fn default_min_relevance_must_be_in_unit_range() {
	expect_validation(
		sample_with("search", "default_min_relevance", Value::Float(1.5)),
		"search.default_min_relevance must be in the range 0.0-1.0.",
	);
}

#[test]
fn embed_timeout_must_be_positive() {
	expect_validation(
		sample_with("search", "embed_timeout_ms", Value::Integer(0)),
		"search.embed_timeout_ms must be greater than zero.",
	);
}

#[test]
fn snippet_lengths_must_be_positive() {
	expect_validation(
		sample_with("snippet", "note_max_chars", Value::Integer(0)),
		"snippet.note_max_chars must be greater than zero.",
	);
}

#[test]
fn embedding_dimensions_must_be_positive() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let embedding = value
		.get_mut("providers")
		.and_then(|providers| providers.get_mut("embedding"))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [providers.embedding].");

	embedding.insert("dimensions".to_string(), Value::Integer(0));

	expect_validation(
		toml::to_string(&value).expect("Failed to render config."),
		"providers.embedding.dimensions must be greater than zero.",
	);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("kb_config_test_missing_file.toml");
	let err = kb_config::load(&path).expect_err("Expected a read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind = 1".to_string())
		.expect_err("Expected a parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}
