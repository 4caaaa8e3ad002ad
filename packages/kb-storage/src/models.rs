use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::contains_folded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
	Document,
	Note,
}
impl ItemKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Document => "document",
			Self::Note => "note",
		}
	}
}

/// Identity of an indexed item. Ids are only unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef {
	pub kind: ItemKind,
	pub id: i64,
}
impl fmt::Display for ItemRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.kind.as_str(), self.id)
	}
}

/// Which item kinds a store call should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
	All,
	Documents,
	Notes,
}
impl TypeFilter {
	pub fn includes(self, kind: ItemKind) -> bool {
		match self {
			Self::All => true,
			Self::Documents => kind == ItemKind::Document,
			Self::Notes => kind == ItemKind::Note,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
	pub id: i64,
	pub filename: String,
	pub file_type: String,
	pub content: String,
	#[serde(default)]
	pub metadata: Map<String, Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embedding: Option<Vec<f32>>,
	#[serde(with = "crate::timestamp")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
	pub id: i64,
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub tags: BTreeSet<String>,
	#[serde(default)]
	pub priority: i32,
	#[serde(default)]
	pub archived: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embedding: Option<Vec<f32>>,
	#[serde(with = "crate::timestamp")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub enum IndexedItem {
	Document(Document),
	Note(Note),
}
impl IndexedItem {
	pub fn kind(&self) -> ItemKind {
		match self {
			Self::Document(_) => ItemKind::Document,
			Self::Note(_) => ItemKind::Note,
		}
	}

	pub fn item_ref(&self) -> ItemRef {
		match self {
			Self::Document(doc) => ItemRef { kind: ItemKind::Document, id: doc.id },
			Self::Note(note) => ItemRef { kind: ItemKind::Note, id: note.id },
		}
	}

	pub fn title(&self) -> &str {
		match self {
			Self::Document(doc) => &doc.filename,
			Self::Note(note) => &note.title,
		}
	}

	pub fn content(&self) -> &str {
		match self {
			Self::Document(doc) => &doc.content,
			Self::Note(note) => &note.content,
		}
	}

	pub fn embedding(&self) -> Option<&[f32]> {
		match self {
			Self::Document(doc) => doc.embedding.as_deref(),
			Self::Note(note) => note.embedding.as_deref(),
		}
	}

	pub fn created_at(&self) -> OffsetDateTime {
		match self {
			Self::Document(doc) => doc.created_at,
			Self::Note(note) => note.created_at,
		}
	}

	pub fn is_archived(&self) -> bool {
		match self {
			Self::Document(_) => false,
			Self::Note(note) => note.archived,
		}
	}

	/// Text the lexical scorer sees. Notes include their title.
	pub fn search_text(&self) -> String {
		match self {
			Self::Document(doc) => doc.content.clone(),
			Self::Note(note) => format!("{}\n{}", note.title, note.content),
		}
	}

	pub fn matches_text(&self, text: &str) -> bool {
		match self {
			Self::Document(doc) => contains_folded(&doc.content, text),
			Self::Note(note) =>
				contains_folded(&note.title, text) || contains_folded(&note.content, text),
		}
	}

	pub fn matches_category(&self, category: &str) -> bool {
		match self {
			Self::Document(doc) => {
				if contains_folded(&doc.file_type, category) {
					return true;
				}
				if doc.metadata.is_empty() {
					return false;
				}

				let rendered = Value::Object(doc.metadata.clone()).to_string();

				contains_folded(&rendered, category)
			},
			Self::Note(note) => note.tags.iter().any(|tag| contains_folded(tag, category)),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use time::macros::datetime;

	use super::*;

	fn doc(file_type: &str, metadata: Value) -> IndexedItem {
		IndexedItem::Document(Document {
			id: 7,
			filename: "report.pdf".to_string(),
			file_type: file_type.to_string(),
			content: "Quarterly Revenue grew".to_string(),
			metadata: metadata.as_object().cloned().unwrap_or_default(),
			embedding: None,
			created_at: datetime!(2024-01-01 00:00:00 UTC),
		})
	}

	fn note(tags: &[&str]) -> IndexedItem {
		IndexedItem::Note(Note {
			id: 7,
			title: "Groceries".to_string(),
			content: "buy apples".to_string(),
			tags: tags.iter().map(|tag| tag.to_string()).collect(),
			priority: 0,
			archived: false,
			embedding: None,
			created_at: datetime!(2024-01-01 00:00:00 UTC),
		})
	}

	#[test]
	fn identity_is_scoped_by_kind() {
		let a = doc("pdf", json!({}));
		let b = note(&[]);

		assert_eq!(a.item_ref().id, b.item_ref().id);
		assert_ne!(a.item_ref(), b.item_ref());
		assert_eq!(a.item_ref().to_string(), "document-7");
	}

	#[test]
	fn note_search_text_includes_title() {
		assert_eq!(note(&[]).search_text(), "Groceries\nbuy apples");
		assert!(note(&[]).matches_text("GROCER"));
	}

	#[test]
	fn document_category_matches_file_type_or_metadata() {
		assert!(doc("pdf", json!({})).matches_category("PDF"));
		assert!(doc("docx", json!({ "project": "finance" })).matches_category("finance"));
		assert!(!doc("docx", json!({})).matches_category("finance"));
	}

	#[test]
	fn note_category_matches_any_tag_substring() {
		assert!(note(&["shopping-list"]).matches_category("shopping"));
		assert!(!note(&["work"]).matches_category("shopping"));
	}
}
