use serde::{Deserialize, Serialize};

use crate::{KnowledgeService, Result};
use kb_storage::StoreStats;

/// Corpus counts plus the live state of the embedding runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
	#[serde(flatten)]
	pub store: StoreStats,
	pub semantic_enabled: bool,
}

impl KnowledgeService {
	pub fn stats(&self) -> Result<KnowledgeStats> {
		let store = self.store.stats()?;

		Ok(KnowledgeStats { store, semantic_enabled: self.embedder.is_ready() })
	}
}
