pub mod corpus;
pub mod memory;
pub mod models;
pub mod timestamp;

mod error;

pub use error::Error;
pub use memory::MemoryStore;

use models::{IndexedItem, TypeFilter};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read-only view over indexed documents and notes.
///
/// Implementations must be safe to query concurrently; the retrieval engine never writes
/// through this trait.
pub trait ItemStore
where
	Self: Send + Sync,
{
	/// Items whose searchable text contains `text` case-insensitively.
	///
	/// Documents match on content, notes on title or content; archived notes never match.
	/// When `category` is set, documents must carry it in their file type or metadata and
	/// notes in one of their tags. Each item kind is ordered by its display priority and
	/// truncated to `per_kind_limit` independently.
	fn find_by_substring(
		&self,
		text: &str,
		filter: TypeFilter,
		category: Option<&str>,
		per_kind_limit: usize,
	) -> Result<Vec<IndexedItem>>;

	/// Every non-archived item that carries a stored embedding.
	fn all_with_embedding(&self, filter: TypeFilter) -> Result<Vec<IndexedItem>>;

	fn stats(&self) -> Result<StoreStats>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreStats {
	pub documents: u64,
	pub notes: u64,
	pub archived_notes: u64,
	pub documents_with_embedding: u64,
	pub notes_with_embedding: u64,
}

/// Case-insensitive containment used by every store implementation.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
	if needle.is_empty() {
		return true;
	}

	haystack.to_lowercase().contains(&needle.to_lowercase())
}
