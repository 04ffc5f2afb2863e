use std::sync::Arc;

use crate::recommendation::RecommendationPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client, catalog source and vocabulary, wired once at startup.
    pub pipeline: Arc<RecommendationPipeline>,
}
