pub mod embedder;
pub mod schema;
pub mod search;
pub mod stats;

mod error;

pub use embedder::EmbeddingRuntime;
pub use error::{Error, Result};
pub use search::{
	ResultItem, ResultSource, ScoreChannel, ScoredResult, SearchRequest, SearchResponse,
	SearchType,
};
pub use stats::KnowledgeStats;

use std::{future::Future, pin::Pin, sync::Arc};

use kb_config::{Config, EmbeddingProviderConfig};
use kb_providers::embedding;
use kb_storage::ItemStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	/// One vector per input text, in input order.
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

/// Embedding provider backed by the configured OpenAI-compatible endpoint.
pub struct HttpEmbeddingProvider {
	cfg: EmbeddingProviderConfig,
}
impl HttpEmbeddingProvider {
	pub fn new(cfg: EmbeddingProviderConfig) -> Self {
		Self { cfg }
	}
}

impl EmbeddingProvider for HttpEmbeddingProvider {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(&self.cfg, texts).await?) })
	}
}

/// Read-only retrieval over an item store, with optional semantic scoring.
pub struct KnowledgeService {
	pub cfg: Config,
	pub store: Arc<dyn ItemStore>,
	pub embedder: Arc<EmbeddingRuntime>,
}
impl KnowledgeService {
	pub fn new(cfg: Config, store: Arc<dyn ItemStore>, embedder: Arc<EmbeddingRuntime>) -> Self {
		Self { cfg, store, embedder }
	}

	/// Builds the service and, when an embedding provider is configured, initializes the
	/// runtime with the HTTP provider.
	pub fn from_config(cfg: Config, store: Arc<dyn ItemStore>) -> Self {
		let embedder = Arc::new(EmbeddingRuntime::new());

		if let Some(provider) = cfg.providers.embedding.clone() {
			embedder.init(Arc::new(HttpEmbeddingProvider::new(provider)));
		}

		Self::new(cfg, store, embedder)
	}

	pub(crate) fn expected_dimensions(&self) -> Option<usize> {
		self.cfg.providers.embedding.as_ref().map(|embedding| embedding.dimensions as usize)
	}
}
