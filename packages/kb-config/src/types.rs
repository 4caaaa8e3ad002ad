use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub snippet: Snippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// JSON file holding the `documents` and `notes` arrays.
	pub corpus_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Providers {
	/// Optional. Without it every query runs lexical-only.
	pub embedding: Option<EmbeddingProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub default_limit: u32,
	pub max_limit: u32,
	pub default_min_relevance: f32,
	/// Upper bound on the query embedding call before the query degrades to lexical-only.
	pub embed_timeout_ms: u64,
	/// Lexical candidates fetched per item kind, as a multiple of the requested limit.
	pub candidate_factor: u32,
	/// Text length (in chars) above which the lexical score is discounted.
	pub length_norm_chars: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: 10,
			max_limit: 100,
			default_min_relevance: 0.3,
			embed_timeout_ms: 2_000,
			candidate_factor: 1,
			length_norm_chars: 1_000,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Snippet {
	pub document_max_chars: u32,
	pub note_max_chars: u32,
	/// How far the window start may move forward to reach a word boundary.
	pub boundary_window_chars: u32,
}
impl Default for Snippet {
	fn default() -> Self {
		Self { document_max_chars: 300, note_max_chars: 200, boundary_window_chars: 50 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
