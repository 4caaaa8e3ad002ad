//! Function-calling description of the search operation, for assistant runtimes that select
//! tools by JSON schema.

use serde_json::{Value, json};

pub const TOOL_NAME: &str = "knowledge_search";

pub fn tool_schema(cfg: &kb_config::Search) -> Value {
	json!({
		"name": TOOL_NAME,
		"description": "Search the personal knowledge base of uploaded documents and notes. \
			Combines keyword matching with semantic similarity when embeddings are available.",
		"parameters": {
			"type": "object",
			"properties": {
				"query": {
					"type": "string",
					"description": "Text to search for."
				},
				"search_type": {
					"type": "string",
					"enum": ["all", "documents", "notes", "semantic", "text"],
					"default": "all",
					"description": "Which items to search and which scoring passes to run."
				},
				"limit": {
					"type": "integer",
					"minimum": 1,
					"maximum": cfg.max_limit,
					"default": cfg.default_limit,
					"description": "Maximum number of results."
				},
				"min_relevance": {
					"type": "number",
					"minimum": 0.0,
					"maximum": 1.0,
					"default": cfg.default_min_relevance,
					"description": "Minimum relevance score for a result to be returned."
				},
				"category": {
					"type": "string",
					"description": "Restrict documents to a file type or metadata value and notes to a tag."
				}
			},
			"required": ["query"]
		}
	})
}
