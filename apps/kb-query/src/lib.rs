use std::{path::PathBuf, sync::Arc};

use clap::{Parser, ValueEnum};

use kb_service::{KnowledgeService, SearchRequest, SearchType};

#[derive(Debug, Parser)]
#[command(
	version = kb_cli::VERSION,
	rename_all = "kebab",
	styles = kb_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Text to search for. Omit together with `--stats` to print corpus counts only.
	#[arg(value_name = "QUERY", required_unless_present = "stats")]
	pub query: Option<String>,
	#[arg(long, short = 't', value_enum, value_name = "TYPE")]
	pub search_type: Option<SearchTypeArg>,
	#[arg(long, short = 'n', value_name = "N")]
	pub limit: Option<u32>,
	#[arg(long, value_name = "SCORE")]
	pub min_relevance: Option<f32>,
	#[arg(long, value_name = "CATEGORY")]
	pub category: Option<String>,
	#[arg(long, conflicts_with = "query")]
	pub stats: bool,
}
impl Args {
	pub fn request(&self) -> Option<SearchRequest> {
		let query = self.query.as_ref()?;

		Some(SearchRequest {
			query: query.clone(),
			search_type: self.search_type.map(SearchType::from),
			limit: self.limit,
			min_relevance: self.min_relevance,
			category: self.category.clone(),
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchTypeArg {
	All,
	Documents,
	Notes,
	Semantic,
	Text,
}
impl From<SearchTypeArg> for SearchType {
	fn from(value: SearchTypeArg) -> Self {
		match value {
			SearchTypeArg::All => Self::All,
			SearchTypeArg::Documents => Self::Documents,
			SearchTypeArg::Notes => Self::Notes,
			SearchTypeArg::Semantic => Self::Semantic,
			SearchTypeArg::Text => Self::Text,
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = kb_config::load(&args.config)?;

	kb_cli::init_tracing(&config.service.log_level)?;

	let store = kb_storage::corpus::load(&config.storage.corpus_path)?;
	let service = KnowledgeService::from_config(config, Arc::new(store));
	let output = match args.request() {
		Some(request) => serde_json::to_string_pretty(&service.search(request).await?)?,
		None => serde_json::to_string_pretty(&service.stats()?)?,
	};

	service.embedder.shutdown();

	println!("{output}");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_search_flags() {
		let args = Args::try_parse_from([
			"kb-query",
			"--config",
			"kb.toml",
			"apple pie",
			"--search-type",
			"semantic",
			"--limit",
			"3",
			"--category",
			"recipes",
		])
		.expect("Arguments must parse.");
		let request = args.request().expect("A query was given.");

		assert_eq!(request.query, "apple pie");
		assert_eq!(request.search_type, Some(SearchType::Semantic));
		assert_eq!(request.limit, Some(3));
		assert_eq!(request.category.as_deref(), Some("recipes"));
		assert!(request.min_relevance.is_none());
	}

	#[test]
	fn stats_mode_needs_no_query() {
		let args = Args::try_parse_from(["kb-query", "-c", "kb.toml", "--stats"])
			.expect("Arguments must parse.");

		assert!(args.stats);
		assert!(args.request().is_none());
	}

	#[test]
	fn query_is_required_without_stats() {
		assert!(Args::try_parse_from(["kb-query", "-c", "kb.toml"]).is_err());
	}
}
