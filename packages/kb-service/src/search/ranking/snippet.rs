use super::text::query_tokens;

pub const ELLIPSIS: &str = "...";

/// Excerpt of at most `max_chars` characters around the first query match, plus ellipsis
/// markers on truncated sides.
///
/// The full query is located first, then each query token in query order. Without a match the
/// excerpt is the head of the text. The window spans a third of `max_chars` before the match
/// and two thirds after it; its start moves forward to a word boundary when one lies within
/// `boundary_window` characters ahead of it and before the match, and its end moves back to
/// the last word boundary inside the window. All positions are character positions.
pub fn extract_snippet(
	text: &str,
	query: &str,
	max_chars: usize,
	boundary_window: usize,
) -> String {
	if text.is_empty() {
		return String::new();
	}

	let chars: Vec<char> = text.chars().collect();
	let total = chars.len();
	let Some(match_pos) = locate(text, query) else {
		return head(&chars, max_chars);
	};
	let mut start = match_pos.saturating_sub(max_chars / 3);
	let mut end = (match_pos + max_chars * 2 / 3).min(total);

	if start > 0
		&& let Some(offset) = chars[start..end].iter().position(|ch| ch.is_whitespace())
	{
		let boundary = start + offset + 1;

		if offset < boundary_window && boundary <= match_pos {
			start = boundary;
		}
	}
	if end < total
		&& let Some(offset) = chars[start..end].iter().rposition(|ch| ch.is_whitespace())
		&& offset > 0
	{
		end = start + offset;
	}

	let mut out = String::with_capacity((end - start) + ELLIPSIS.len() * 2);

	if start > 0 {
		out.push_str(ELLIPSIS);
	}

	out.extend(&chars[start..end]);

	if end < total {
		out.push_str(ELLIPSIS);
	}

	out
}

fn head(chars: &[char], max_chars: usize) -> String {
	if chars.len() <= max_chars {
		return chars.iter().collect();
	}

	let mut out: String = chars[..max_chars].iter().collect();

	out.push_str(ELLIPSIS);

	out
}

/// Char index of the first case-insensitive match of the query, or of its first matching token.
fn locate(text: &str, query: &str) -> Option<usize> {
	let query = query.trim();

	if query.is_empty() {
		return None;
	}

	let folded = fold(text);

	find_char_index(&folded, &fold(query)).or_else(|| {
		query_tokens(query)
			.iter()
			.find_map(|token| find_char_index(&folded, &fold(token)))
	})
}

/// Lowercases char by char, keeping a one-to-one mapping with the input characters.
fn fold(text: &str) -> String {
	text.chars()
		.map(|ch| {
			let mut lower = ch.to_lowercase();

			match (lower.next(), lower.next()) {
				(Some(single), None) => single,
				_ => ch,
			}
		})
		.collect()
}

fn find_char_index(haystack: &str, needle: &str) -> Option<usize> {
	haystack.find(needle).map(|byte| haystack[..byte].chars().count())
}
