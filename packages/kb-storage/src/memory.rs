use std::{cmp::Reverse, collections::HashSet, sync::RwLock};

use crate::{
	ItemStore, Result, StoreStats,
	models::{IndexedItem, ItemKind, TypeFilter},
};

/// In-process item store backed by a vector behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
	items: RwLock<Vec<IndexedItem>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store, rejecting duplicate `(kind, id)` pairs.
	pub fn from_items(items: Vec<IndexedItem>) -> Result<Self> {
		let mut seen = HashSet::new();

		for item in &items {
			if !seen.insert(item.item_ref()) {
				return Err(crate::Error::Conflict(format!(
					"Duplicate item {} in corpus.",
					item.item_ref()
				)));
			}
		}

		Ok(Self { items: RwLock::new(items) })
	}

	pub fn len(&self) -> usize {
		self.items.read().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl ItemStore for MemoryStore {
	fn find_by_substring(
		&self,
		text: &str,
		filter: TypeFilter,
		category: Option<&str>,
		per_kind_limit: usize,
	) -> Result<Vec<IndexedItem>> {
		let items = self.items.read().unwrap_or_else(|err| err.into_inner());
		let category = category.map(str::trim).filter(|value| !value.is_empty());
		let mut documents = Vec::new();
		let mut notes = Vec::new();

		for item in items.iter() {
			if !filter.includes(item.kind()) || item.is_archived() || !item.matches_text(text) {
				continue;
			}
			if let Some(category) = category
				&& !item.matches_category(category)
			{
				continue;
			}

			match item {
				IndexedItem::Document(_) => documents.push(item.clone()),
				IndexedItem::Note(_) => notes.push(item.clone()),
			}
		}

		documents.sort_by_key(|item| Reverse(item.created_at()));
		notes.sort_by_key(|item| {
			let priority = match item {
				IndexedItem::Note(note) => note.priority,
				IndexedItem::Document(_) => 0,
			};

			(Reverse(priority), Reverse(item.created_at()))
		});
		documents.truncate(per_kind_limit);
		notes.truncate(per_kind_limit);
		documents.extend(notes);

		tracing::debug!(
			matched = documents.len(),
			per_kind_limit,
			"Collected lexical candidates."
		);

		Ok(documents)
	}

	fn all_with_embedding(&self, filter: TypeFilter) -> Result<Vec<IndexedItem>> {
		let items = self.items.read().unwrap_or_else(|err| err.into_inner());

		Ok(items
			.iter()
			.filter(|item| {
				filter.includes(item.kind()) && !item.is_archived() && item.embedding().is_some()
			})
			.cloned()
			.collect())
	}

	fn stats(&self) -> Result<StoreStats> {
		let items = self.items.read().unwrap_or_else(|err| err.into_inner());
		let mut stats = StoreStats::default();

		for item in items.iter() {
			let embedded = item.embedding().is_some();

			match item.kind() {
				ItemKind::Document => {
					stats.documents += 1;

					if embedded {
						stats.documents_with_embedding += 1;
					}
				},
				ItemKind::Note => {
					stats.notes += 1;

					if item.is_archived() {
						stats.archived_notes += 1;
					}
					if embedded {
						stats.notes_with_embedding += 1;
					}
				},
			}
		}

		Ok(stats)
	}
}
