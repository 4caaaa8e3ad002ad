use std::sync::Arc;

use kb_service::KnowledgeService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KnowledgeService>,
}
impl AppState {
	/// Loads the configured corpus and starts the embedding runtime when a provider is set.
	pub fn new(config: kb_config::Config) -> color_eyre::Result<Self> {
		let store = kb_storage::corpus::load(&config.storage.corpus_path)?;
		let service = KnowledgeService::from_config(config, Arc::new(store));

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: KnowledgeService) -> Self {
		Self { service: Arc::new(service) }
	}
}
