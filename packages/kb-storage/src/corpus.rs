use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
	Error, MemoryStore, Result,
	models::{Document, IndexedItem, Note},
};

/// On-disk layout of an exported knowledge base.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Corpus {
	#[serde(default)]
	pub documents: Vec<Document>,
	#[serde(default)]
	pub notes: Vec<Note>,
}
impl Corpus {
	pub fn into_items(self) -> Vec<IndexedItem> {
		self.documents
			.into_iter()
			.map(IndexedItem::Document)
			.chain(self.notes.into_iter().map(IndexedItem::Note))
			.collect()
	}
}

pub fn load(path: &Path) -> Result<MemoryStore> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadCorpus { path: path.to_path_buf(), source: err })?;
	let corpus: Corpus = serde_json::from_str(&raw)
		.map_err(|err| Error::ParseCorpus { path: path.to_path_buf(), source: err })?;
	let documents = corpus.documents.len();
	let notes = corpus.notes.len();
	let store = MemoryStore::from_items(corpus.into_items())?;

	tracing::info!(path = %path.display(), documents, notes, "Loaded knowledge corpus.");

	Ok(store)
}
