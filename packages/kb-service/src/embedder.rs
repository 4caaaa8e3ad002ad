use std::{
	sync::{Arc, RwLock},
	time::Duration,
};

use crate::{EmbeddingProvider, Error, Result};

/// Process-wide handle to the loaded embedding model.
///
/// The runtime starts empty. `init` installs a provider and `shutdown` removes it; queries
/// issued while no provider is installed run lexical-only.
#[derive(Default)]
pub struct EmbeddingRuntime {
	provider: RwLock<Option<Arc<dyn EmbeddingProvider>>>,
}
impl EmbeddingRuntime {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
		let runtime = Self::new();

		runtime.init(provider);

		runtime
	}

	/// Installs `provider`. Returns `true` when a previous provider was replaced.
	pub fn init(&self, provider: Arc<dyn EmbeddingProvider>) -> bool {
		let mut slot = self.provider.write().unwrap_or_else(|err| err.into_inner());
		let replaced = slot.replace(provider).is_some();

		tracing::info!(replaced, "Embedding runtime initialized.");

		replaced
	}

	/// Removes the provider. Returns `true` when one was installed.
	pub fn shutdown(&self) -> bool {
		let mut slot = self.provider.write().unwrap_or_else(|err| err.into_inner());
		let was_ready = slot.take().is_some();

		if was_ready {
			tracing::info!("Embedding runtime shut down.");
		}

		was_ready
	}

	pub fn is_ready(&self) -> bool {
		self.provider.read().unwrap_or_else(|err| err.into_inner()).is_some()
	}

	pub fn current(&self) -> Option<Arc<dyn EmbeddingProvider>> {
		self.provider.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Embeds a single query, bounded by `timeout`.
	///
	/// Every failure mode (no provider, provider error, timeout, malformed vector) is reported
	/// as [`Error::ScoringDegraded`] so the caller can fall back to lexical scoring.
	pub async fn embed_query(
		&self,
		text: &str,
		timeout: Duration,
		expected_dim: Option<usize>,
	) -> Result<Vec<f32>> {
		let Some(provider) = self.current() else {
			return Err(Error::degraded("No embedding model is loaded."));
		};
		let texts = [text.to_string()];
		let vectors = match tokio::time::timeout(timeout, provider.embed(&texts)).await {
			Ok(Ok(vectors)) => vectors,
			Ok(Err(err)) => return Err(Error::degraded(format!("Embedding provider failed: {err}"))),
			Err(_) =>
				return Err(Error::degraded(format!(
					"Embedding provider timed out after {} ms.",
					timeout.as_millis()
				))),
		};
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::degraded("Embedding provider returned no vectors."));
		};

		if vector.is_empty() {
			return Err(Error::degraded("Query embedding is empty."));
		}
		if let Some(expected) = expected_dim
			&& vector.len() != expected
		{
			return Err(Error::degraded(format!(
				"Query embedding has {} dimensions; expected {expected}.",
				vector.len()
			)));
		}
		if vector.iter().any(|value| !value.is_finite()) {
			return Err(Error::degraded("Query embedding contains non-finite values."));
		}
		if vector.iter().all(|value| *value == 0.0) {
			return Err(Error::degraded("Query embedding has zero norm."));
		}

		Ok(vector)
	}
}
