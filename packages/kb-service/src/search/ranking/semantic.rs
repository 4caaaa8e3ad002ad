use crate::{Error, Result};

/// Cosine similarity between two vectors of equal dimension.
///
/// Empty vectors, mismatched dimensions, non-finite components and zero norms are reported as
/// [`Error::ScoringDegraded`].
pub fn cosine_similarity(query: &[f32], stored: &[f32]) -> Result<f32> {
	if stored.is_empty() {
		return Err(Error::degraded("Stored embedding is empty."));
	}
	if query.len() != stored.len() {
		return Err(Error::degraded(format!(
			"Stored embedding has {} dimensions; query has {}.",
			stored.len(),
			query.len()
		)));
	}

	let mut dot = 0.0_f64;
	let mut query_norm = 0.0_f64;
	let mut stored_norm = 0.0_f64;

	for (q, s) in query.iter().zip(stored) {
		if !q.is_finite() || !s.is_finite() {
			return Err(Error::degraded("Embedding contains non-finite values."));
		}

		let (q, s) = (f64::from(*q), f64::from(*s));

		dot += q * s;
		query_norm += q * q;
		stored_norm += s * s;
	}

	if query_norm == 0.0 || stored_norm == 0.0 {
		return Err(Error::degraded("Embedding has zero norm."));
	}

	Ok((dot / (query_norm.sqrt() * stored_norm.sqrt())) as f32)
}

/// Cosine similarity clamped to `[0, 1]`; opposed vectors carry no relevance.
pub fn semantic_similarity(query: &[f32], stored: &[f32]) -> Result<f32> {
	Ok(cosine_similarity(query, stored)?.clamp(0.0, 1.0))
}
