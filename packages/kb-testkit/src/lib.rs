mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use time::{Duration, OffsetDateTime, macros::datetime};

use kb_storage::{
	MemoryStore,
	corpus::Corpus,
	models::{Document, IndexedItem, Note},
};

pub const BASE_TIME: OffsetDateTime = datetime!(2024-01-01 00:00:00 UTC);

/// A fixed point `days` after [`BASE_TIME`], so ordering in tests is explicit.
pub fn day(days: i64) -> OffsetDateTime {
	BASE_TIME + Duration::days(days)
}

/// Deterministic bag-of-words embedding.
///
/// Each lowercase alphanumeric token is hashed with blake3 into one signed bucket, then the
/// vector is L2-normalized. Texts sharing tokens get positive cosine similarity; disjoint
/// texts are near orthogonal. Text without tokens yields the zero vector.
pub fn hash_embedding(text: &str, dim: usize) -> Vec<f32> {
	let dim = dim.max(1);
	let mut vec = vec![0.0_f32; dim];

	for token in text
		.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(str::to_lowercase)
	{
		let hash = blake3::hash(token.as_bytes());
		let bytes = hash.as_bytes();
		let mut bucket = [0_u8; 8];

		bucket.copy_from_slice(&bytes[..8]);

		let index = (u64::from_le_bytes(bucket) % dim as u64) as usize;
		let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };

		vec[index] += sign;
	}

	let norm = vec.iter().map(|value| value * value).sum::<f32>().sqrt();

	if norm > 0.0 {
		for value in &mut vec {
			*value /= norm;
		}
	}

	vec
}

pub fn note(id: i64, title: &str, content: &str) -> Note {
	Note {
		id,
		title: title.to_string(),
		content: content.to_string(),
		tags: Default::default(),
		priority: 0,
		archived: false,
		embedding: None,
		created_at: BASE_TIME,
	}
}

pub fn document(id: i64, filename: &str, content: &str) -> Document {
	let file_type = Path::new(filename)
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or("txt")
		.to_string();

	Document {
		id,
		filename: filename.to_string(),
		file_type,
		content: content.to_string(),
		metadata: Default::default(),
		embedding: None,
		created_at: BASE_TIME,
	}
}

/// Gives every item without an embedding a [`hash_embedding`] of its searchable text.
pub fn embed_all(items: &mut [IndexedItem], dim: usize) {
	for item in items {
		let text = item.search_text();

		match item {
			IndexedItem::Document(doc) if doc.embedding.is_none() =>
				doc.embedding = Some(hash_embedding(&text, dim)),
			IndexedItem::Note(note) if note.embedding.is_none() =>
				note.embedding = Some(hash_embedding(&text, dim)),
			_ => {},
		}
	}
}

pub fn store(items: Vec<IndexedItem>) -> MemoryStore {
	MemoryStore::from_items(items).expect("Test corpus must not contain duplicate items.")
}

/// A corpus JSON file in the temp directory, removed on drop.
pub struct TempCorpus {
	path: PathBuf,
}
impl TempCorpus {
	pub fn write(corpus: &Corpus) -> Result<Self> {
		Self::write_raw(&serde_json::to_string_pretty(corpus)?)
	}

	pub fn write_raw(payload: &str) -> Result<Self> {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|err| Error::Message(format!("System time is before the epoch: {err}.")))?
			.as_nanos();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let pid = std::process::id();
		let mut path = env::temp_dir();

		path.push(format!("kb_corpus_{nanos}_{pid}_{ordinal}.json"));

		fs::write(&path, payload)?;

		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}
impl Drop for TempCorpus {
	fn drop(&mut self) {
		let _ = fs::remove_file(&self.path);
	}
}
