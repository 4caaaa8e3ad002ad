mod dedup;
mod fusion;
mod order;
mod semantic;
mod snippet;
mod text;

pub(crate) use dedup::dedup_candidates;
pub use fusion::{FusedScore, fuse};
pub use order::{cmp_f32_desc, cmp_results, rank_results};
pub use semantic::{cosine_similarity, semantic_similarity};
pub use snippet::{ELLIPSIS, extract_snippet};
pub use text::{query_tokens, text_relevance};
