use std::collections::HashSet;

/// Lowercase whitespace-delimited query tokens, deduplicated in first-seen order.
pub fn query_tokens(query: &str) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for token in query.split_whitespace() {
		let token = token.to_lowercase();

		if seen.insert(token.clone()) {
			out.push(token);
		}
	}

	out
}

/// Lexical relevance of `text` for `query`, in `[0, 1]`.
///
/// Each non-overlapping exact phrase hit counts twice, each distinct shared token once, and
/// the sum is divided by the number of distinct query tokens. Texts longer than
/// `length_norm_chars` are discounted proportionally.
pub fn text_relevance(query: &str, text: &str, length_norm_chars: u32) -> f32 {
	let text_chars = text.chars().count();

	if text_chars == 0 {
		return 0.0;
	}

	let query_lower = query.to_lowercase();
	let text_lower = text.to_lowercase();
	let query_words: HashSet<&str> = query_lower.split_whitespace().collect();

	if query_words.is_empty() {
		return 0.0;
	}

	let text_words: HashSet<&str> = text_lower.split_whitespace().collect();
	let exact = text_lower.matches(query_lower.as_str()).count();
	let word_matches = query_words.intersection(&text_words).count();
	let length_factor = (length_norm_chars as f32 / text_chars as f32).min(1.0);
	let raw = (exact * 2 + word_matches) as f32 / query_words.len() as f32;

	(raw * length_factor).clamp(0.0, 1.0)
}
