use std::cmp::Ordering;

use crate::search::ScoredResult;

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	b.total_cmp(&a)
}

/// Higher relevance first, then most recent first.
pub fn cmp_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
	cmp_f32_desc(a.relevance_score, b.relevance_score)
		.then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort by [`cmp_results`], truncated to `limit`.
pub fn rank_results(mut results: Vec<ScoredResult>, limit: usize) -> Vec<ScoredResult> {
	results.sort_by(cmp_results);
	results.truncate(limit);

	results
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::search::{ResultItem, ResultSource, ScoreChannel};

	fn result(id: i64, score: f32, day: i64) -> ScoredResult {
		ScoredResult {
			item: ResultItem::Note {
				id,
				title: format!("note {id}"),
				tags: BTreeSet::new(),
				priority: 0,
			},
			snippet: String::new(),
			created_at: kb_testkit::day(day),
			relevance_score: score,
			source: ResultSource::Notes,
			channel: ScoreChannel::Lexical,
		}
	}

	fn ids(results: &[ScoredResult]) -> Vec<i64> {
		results.iter().map(|result| result.item_ref().id).collect()
	}

	#[test]
	fn sorts_by_score_then_recency() {
		let ranked = rank_results(
			vec![result(1, 0.5, 1), result(2, 0.9, 0), result(3, 0.5, 5), result(4, 0.1, 9)],
			10,
		);

		assert_eq!(ids(&ranked), vec![2, 3, 1, 4]);
	}

	#[test]
	fn full_ties_keep_input_order() {
		let ranked = rank_results(vec![result(7, 0.5, 1), result(3, 0.5, 1)], 10);

		assert_eq!(ids(&ranked), vec![7, 3]);
	}

	#[test]
	fn truncates_to_limit() {
		let ranked = rank_results(vec![result(1, 0.2, 0), result(2, 0.3, 0), result(3, 0.4, 0)], 2);

		assert_eq!(ids(&ranked), vec![3, 2]);
	}
}
