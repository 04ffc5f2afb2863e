//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::recommendation::pipeline::{RecommendationOutcome, SearchPlan};
use crate::state::AppState;

/// Shortest job description worth sending to the model.
const MIN_QUERY_CHARS: usize = 10;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

fn validate_query(query: &str) -> Result<&str, AppError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(AppError::Validation(format!(
            "query must be at least {MIN_QUERY_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// POST /recommend
///
/// Full pipeline: extract filters → search the catalog → rank.
/// Returns an empty list with a message when no criteria could be extracted.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    let query = validate_query(&request.query)?;

    let started = std::time::Instant::now();
    let outcome = state.pipeline.recommend(query).await?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        recommendations = outcome.recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(outcome))
}

/// POST /filters
///
/// Filter extraction and search URL construction only; no catalog traffic.
pub async fn handle_filters(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<SearchPlan>, AppError> {
    let query = validate_query(&request.query)?;
    let plan = state.pipeline.plan(query).await?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_rejects_short_input() {
        assert!(matches!(validate_query("  Java   "), Err(AppError::Validation(_))));
        assert!(matches!(validate_query(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_query_trims() {
        assert_eq!(validate_query("  Java developer  ").unwrap(), "Java developer");
    }
}
