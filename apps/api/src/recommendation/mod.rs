// Recommendation: orchestrates filter extraction, catalog search and ranking.
// Ranking itself is delegated to the completion model.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod ranker;

pub use pipeline::RecommendationPipeline;
