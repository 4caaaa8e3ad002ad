use crate::search::ScoreChannel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedScore {
	pub score: f32,
	pub channel: ScoreChannel,
}
impl FusedScore {
	pub fn lexical(score: f32) -> Self {
		Self { score: unit(score), channel: ScoreChannel::Lexical }
	}

	pub fn semantic(score: f32) -> Self {
		Self { score: unit(score), channel: ScoreChannel::Semantic }
	}

	pub fn passes(&self, min_relevance: f32) -> bool {
		self.score >= min_relevance
	}
}

/// Keeps the stronger of the two signals. Ties go to the lexical channel.
pub fn fuse(text_score: f32, semantic_score: Option<f32>) -> FusedScore {
	let lexical = FusedScore::lexical(text_score);

	match semantic_score.map(FusedScore::semantic) {
		Some(semantic) if semantic.score > lexical.score => semantic,
		_ => lexical,
	}
}

fn unit(score: f32) -> f32 {
	if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn takes_the_max_signal() {
		assert_eq!(fuse(0.2, Some(0.7)), FusedScore::semantic(0.7));
		assert_eq!(fuse(0.9, Some(0.1)), FusedScore::lexical(0.9));
		assert_eq!(fuse(0.4, None), FusedScore::lexical(0.4));
		assert_eq!(fuse(0.5, Some(0.5)).channel, ScoreChannel::Lexical);
	}

	#[test]
	fn scores_stay_in_unit_range() {
		assert_eq!(fuse(3.0, None).score, 1.0);
		assert_eq!(fuse(f32::NAN, Some(-0.4)).score, 0.0);
	}

	#[test]
	fn threshold_is_inclusive() {
		assert!(FusedScore::lexical(0.3).passes(0.3));
		assert!(!FusedScore::lexical(0.29).passes(0.3));
	}
}
