pub mod ranking;

use std::{
	collections::{BTreeSet, HashSet},
	time::Duration,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, KnowledgeService, Result};
use kb_storage::models::{IndexedItem, ItemKind, ItemRef, TypeFilter};
use ranking::FusedScore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
	#[default]
	All,
	Documents,
	Notes,
	Semantic,
	Text,
}
impl SearchType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Documents => "documents",
			Self::Notes => "notes",
			Self::Semantic => "semantic",
			Self::Text => "text",
		}
	}

	fn lexical_filter(self) -> TypeFilter {
		match self {
			Self::Documents => TypeFilter::Documents,
			Self::Notes => TypeFilter::Notes,
			Self::All | Self::Semantic | Self::Text => TypeFilter::All,
		}
	}

	fn wants_embedding(self) -> bool {
		!matches!(self, Self::Text)
	}

	fn runs_semantic_pass(self) -> bool {
		matches!(self, Self::Semantic)
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub search_type: Option<SearchType>,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub min_relevance: Option<f32>,
	#[serde(default)]
	pub category: Option<String>,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), ..Default::default() }
	}

	pub fn search_type(mut self, search_type: SearchType) -> Self {
		self.search_type = Some(search_type);

		self
	}

	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	pub fn min_relevance(mut self, min_relevance: f32) -> Self {
		self.min_relevance = Some(min_relevance);

		self
	}

	pub fn category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());

		self
	}
}

/// Which retrieval pass produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
	Documents,
	Notes,
	SemanticDocuments,
	SemanticNotes,
}
impl ResultSource {
	fn lexical(kind: ItemKind) -> Self {
		match kind {
			ItemKind::Document => Self::Documents,
			ItemKind::Note => Self::Notes,
		}
	}

	fn semantic(kind: ItemKind) -> Self {
		match kind {
			ItemKind::Document => Self::SemanticDocuments,
			ItemKind::Note => Self::SemanticNotes,
		}
	}
}

/// Which scorer produced the fused relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreChannel {
	Lexical,
	Semantic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultItem {
	Document { id: i64, title: String, file_type: String, metadata: Map<String, Value> },
	Note { id: i64, title: String, tags: BTreeSet<String>, priority: i32 },
}
impl ResultItem {
	pub fn item_ref(&self) -> ItemRef {
		match self {
			Self::Document { id, .. } => ItemRef { kind: ItemKind::Document, id: *id },
			Self::Note { id, .. } => ItemRef { kind: ItemKind::Note, id: *id },
		}
	}

	pub fn title(&self) -> &str {
		match self {
			Self::Document { title, .. } | Self::Note { title, .. } => title,
		}
	}

	pub fn tags(&self) -> Option<&BTreeSet<String>> {
		match self {
			Self::Document { .. } => None,
			Self::Note { tags, .. } => Some(tags),
		}
	}

	fn from_item(item: &IndexedItem) -> Self {
		match item {
			IndexedItem::Document(doc) => Self::Document {
				id: doc.id,
				title: doc.filename.clone(),
				file_type: doc.file_type.clone(),
				metadata: doc.metadata.clone(),
			},
			IndexedItem::Note(note) => Self::Note {
				id: note.id,
				title: note.title.clone(),
				tags: note.tags.clone(),
				priority: note.priority,
			},
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
	#[serde(flatten)]
	pub item: ResultItem,
	pub snippet: String,
	#[serde(with = "kb_storage::timestamp")]
	pub created_at: OffsetDateTime,
	pub relevance_score: f32,
	pub source: ResultSource,
	pub channel: ScoreChannel,
}
impl ScoredResult {
	pub fn item_ref(&self) -> ItemRef {
		self.item.item_ref()
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub query_id: Uuid,
	pub query: String,
	pub search_type: SearchType,
	pub count: usize,
	pub results: Vec<ScoredResult>,
	/// Whether a query embedding was available for this call.
	pub semantic_enabled: bool,
	/// Semantic scoring was wanted but the query ran lexical-only.
	pub degraded: bool,
	/// Distinct items whose stored embedding could not be scored.
	pub skipped_items: u32,
}

/// A scored item before deduplication and snippet rendering.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
	pub(crate) item: IndexedItem,
	pub(crate) fused: FusedScore,
	pub(crate) source: ResultSource,
}

#[derive(Debug, Clone)]
struct ResolvedQuery {
	text: String,
	search_type: SearchType,
	limit: usize,
	min_relevance: f32,
	category: Option<String>,
}

#[derive(Debug, Default)]
struct Retrieval {
	results: Vec<ScoredResult>,
	skipped_items: u32,
}

impl KnowledgeService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = resolve_query(&self.cfg.search, req)?;
		let query_id = Uuid::new_v4();
		let query_vector = if query.search_type.wants_embedding() {
			let timeout = Duration::from_millis(self.cfg.search.embed_timeout_ms);

			match self.embedder.embed_query(&query.text, timeout, self.expected_dimensions()).await
			{
				Ok(vector) => Some(vector),
				Err(err) => {
					tracing::warn!(
						query_id = %query_id,
						error = %err,
						"Semantic scoring unavailable. Falling back to lexical-only."
					);

					None
				},
			}
		} else {
			None
		};
		let degraded = query.search_type.wants_embedding() && query_vector.is_none();
		let Retrieval { results, skipped_items } = self.retrieve(&query, query_vector.as_deref())?;

		tracing::info!(
			query_id = %query_id,
			search_type = query.search_type.as_str(),
			count = results.len(),
			degraded,
			skipped_items,
			"Knowledge search completed."
		);

		Ok(SearchResponse {
			query_id,
			query: query.text,
			search_type: query.search_type,
			count: results.len(),
			results,
			semantic_enabled: query_vector.is_some(),
			degraded,
			skipped_items,
		})
	}

	fn retrieve(&self, query: &ResolvedQuery, query_vector: Option<&[f32]>) -> Result<Retrieval> {
		let mut skipped = HashSet::new();
		let mut candidates = self.lexical_candidates(query, query_vector, &mut skipped)?;

		if query.search_type.runs_semantic_pass()
			&& let Some(query_vector) = query_vector
		{
			candidates.extend(self.semantic_candidates(query, query_vector, &mut skipped)?);
		}

		let candidates = ranking::dedup_candidates(candidates);
		let results: Vec<ScoredResult> =
			candidates.iter().map(|candidate| self.render(candidate, query)).collect();
		let results = ranking::rank_results(results, query.limit);

		Ok(Retrieval { results, skipped_items: skipped.len() as u32 })
	}

	fn lexical_candidates(
		&self,
		query: &ResolvedQuery,
		query_vector: Option<&[f32]>,
		skipped: &mut HashSet<ItemRef>,
	) -> Result<Vec<Candidate>> {
		let per_kind_limit =
			query.limit.saturating_mul(self.cfg.search.candidate_factor.max(1) as usize);
		let items = self.store.find_by_substring(
			&query.text,
			query.search_type.lexical_filter(),
			query.category.as_deref(),
			per_kind_limit,
		)?;
		let mut out = Vec::with_capacity(items.len());

		for item in items {
			let text_score = ranking::text_relevance(
				&query.text,
				&item.search_text(),
				self.cfg.search.length_norm_chars,
			);
			let semantic_score = match (query_vector, item.embedding()) {
				(Some(query_vector), Some(stored)) =>
					match ranking::semantic_similarity(query_vector, stored) {
						Ok(score) => Some(score),
						Err(err) => {
							tracing::warn!(
								item = %item.item_ref(),
								error = %err,
								"Skipping semantic channel for item."
							);

							skipped.insert(item.item_ref());

							None
						},
					},
				_ => None,
			};
			let fused = ranking::fuse(text_score, semantic_score);

			if !fused.passes(query.min_relevance) {
				continue;
			}

			let source = ResultSource::lexical(item.kind());

			out.push(Candidate { item, fused, source });
		}

		Ok(out)
	}

	fn semantic_candidates(
		&self,
		query: &ResolvedQuery,
		query_vector: &[f32],
		skipped: &mut HashSet<ItemRef>,
	) -> Result<Vec<Candidate>> {
		let items = self.store.all_with_embedding(query.search_type.lexical_filter())?;
		let mut out = Vec::new();

		for item in items {
			if let Some(category) = query.category.as_deref()
				&& !item.matches_category(category)
			{
				continue;
			}

			let Some(stored) = item.embedding() else { continue };
			let score = match ranking::semantic_similarity(query_vector, stored) {
				Ok(score) => score,
				Err(err) => {
					tracing::warn!(
						item = %item.item_ref(),
						error = %err,
						"Skipping item with unusable embedding."
					);

					skipped.insert(item.item_ref());

					continue;
				},
			};
			let fused = FusedScore::semantic(score);

			if !fused.passes(query.min_relevance) {
				continue;
			}

			let source = ResultSource::semantic(item.kind());

			out.push(Candidate { item, fused, source });
		}

		Ok(out)
	}

	fn render(&self, candidate: &Candidate, query: &ResolvedQuery) -> ScoredResult {
		let max_chars = match candidate.item.kind() {
			ItemKind::Document => self.cfg.snippet.document_max_chars,
			ItemKind::Note => self.cfg.snippet.note_max_chars,
		};
		let snippet = ranking::extract_snippet(
			candidate.item.content(),
			&query.text,
			max_chars as usize,
			self.cfg.snippet.boundary_window_chars as usize,
		);

		ScoredResult {
			item: ResultItem::from_item(&candidate.item),
			snippet,
			created_at: candidate.item.created_at(),
			relevance_score: candidate.fused.score,
			source: candidate.source,
			channel: candidate.fused.channel,
		}
	}
}

fn resolve_query(cfg: &kb_config::Search, req: SearchRequest) -> Result<ResolvedQuery> {
	let text = req.query.trim();

	if text.is_empty() {
		return Err(Error::invalid_query("Search query is required."));
	}

	let limit = req.limit.unwrap_or(cfg.default_limit);

	if limit == 0 {
		return Err(Error::invalid_query("limit must be greater than zero."));
	}
	if limit > cfg.max_limit {
		return Err(Error::invalid_query(format!("limit must be at most {}.", cfg.max_limit)));
	}

	let min_relevance = req.min_relevance.unwrap_or(cfg.default_min_relevance);

	if !min_relevance.is_finite() || !(0.0..=1.0).contains(&min_relevance) {
		return Err(Error::invalid_query("min_relevance must be in the range 0.0-1.0."));
	}

	let category = req
		.category
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty());

	Ok(ResolvedQuery {
		text: text.to_string(),
		search_type: req.search_type.unwrap_or_default(),
		limit: limit as usize,
		min_relevance,
		category,
	})
}
