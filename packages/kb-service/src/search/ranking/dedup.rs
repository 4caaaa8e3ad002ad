use std::collections::{HashMap, hash_map::Entry};

use kb_storage::models::ItemRef;

use crate::search::Candidate;

/// Collapses candidates that refer to the same item.
///
/// The first occurrence keeps its position and source. A later duplicate with a higher score
/// lifts the kept candidate's score and channel.
pub(crate) fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
	let mut positions: HashMap<ItemRef, usize> = HashMap::with_capacity(candidates.len());
	let mut out: Vec<Candidate> = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		match positions.entry(candidate.item.item_ref()) {
			Entry::Occupied(entry) => {
				let kept = &mut out[*entry.get()];

				if candidate.fused.score > kept.fused.score {
					kept.fused = candidate.fused;
				}
			},
			Entry::Vacant(entry) => {
				entry.insert(out.len());
				out.push(candidate);
			},
		}
	}

	out
}
