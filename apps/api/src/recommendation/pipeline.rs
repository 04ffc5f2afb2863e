//! Recommendation pipeline: job description → filters → search URLs → catalog
//! assessments → ranked recommendations.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::snapshot::{save_snapshot, CatalogSnapshot};
use crate::catalog::{AssessmentDetails, CatalogSource};
use crate::errors::AppError;
use crate::filters::extractor::extract_filters;
use crate::filters::normalizer::NormalizationMode;
use crate::filters::search_url::build_search_urls;
use crate::filters::{CatalogVocabulary, FilterRecord};
use crate::llm_client::TextCompletion;
use crate::recommendation::ranker::{rank_assessments, RecommendedAssessment};

/// Detail pages fetched concurrently per request.
const DETAIL_FETCH_CONCURRENCY: usize = 4;

pub const NO_CRITERIA_MESSAGE: &str = "Could not extract search criteria from job description";

/// Filters extracted from a query plus the search URLs they expand to.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPlan {
    pub filters: FilterRecord,
    pub search_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub filters: FilterRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_urls: Vec<String>,
    pub recommendations: Vec<RecommendedAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Everything a recommendation request needs, wired once at startup.
pub struct RecommendationPipeline {
    pub completion: Arc<dyn TextCompletion>,
    pub catalog: Arc<dyn CatalogSource>,
    pub vocabulary: Arc<CatalogVocabulary>,
    pub normalization: NormalizationMode,
    /// Maximum recommendations returned per request.
    pub limit: usize,
    pub snapshot_path: Option<PathBuf>,
}

impl RecommendationPipeline {
    /// Extracts filters and builds the catalog search URLs, without touching the catalog.
    pub async fn plan(&self, query: &str) -> Result<SearchPlan, AppError> {
        let filters = extract_filters(
            query,
            self.completion.as_ref(),
            &self.vocabulary,
            self.normalization,
        )
        .await?;
        let search_urls = build_search_urls(&filters, &self.vocabulary);
        Ok(SearchPlan {
            filters,
            search_urls,
        })
    }

    pub async fn recommend(&self, query: &str) -> Result<RecommendationOutcome, AppError> {
        let SearchPlan {
            filters,
            search_urls,
        } = self.plan(query).await?;

        // An unfiltered search would return the whole catalog; report instead.
        if filters.is_empty() {
            warn!("No filters were extracted from the job description");
            return Ok(RecommendationOutcome {
                filters,
                search_urls: Vec::new(),
                recommendations: Vec::new(),
                message: Some(NO_CRITERIA_MESSAGE.to_string()),
            });
        }

        let assessments = self.gather_assessments(&search_urls).await;

        if let Some(path) = &self.snapshot_path {
            let snapshot = CatalogSnapshot {
                captured_at: Utc::now(),
                vocabulary_version: self.vocabulary.version.clone(),
                search_urls: search_urls.clone(),
                assessments: assessments.clone(),
            };
            save_snapshot(path, &snapshot)?;
        }

        let recommendations =
            rank_assessments(query, &assessments, self.limit, self.completion.as_ref()).await?;

        Ok(RecommendationOutcome {
            filters,
            search_urls,
            recommendations,
            message: None,
        })
    }

    /// Runs every search URL concurrently, then fetches details for the distinct
    /// assessment links in first-seen order. Failed pages contribute nothing.
    pub async fn gather_assessments(&self, search_urls: &[String]) -> Vec<AssessmentDetails> {
        let listings = join_all(search_urls.iter().map(|url| self.catalog.search(url))).await;

        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for (url, listing) in search_urls.iter().zip(listings) {
            match listing {
                Ok(found) => links.extend(found.into_iter().filter(|link| seen.insert(link.clone()))),
                Err(e) => warn!("Search page yielded no assessments ({url}): {e}"),
            }
        }
        info!(count = links.len(), "Collected distinct assessment links");

        let catalog = self.catalog.as_ref();
        stream::iter(links)
            .map(|link| async move {
                let result = catalog.details(&link).await;
                (link, result)
            })
            .buffered(DETAIL_FETCH_CONCURRENCY)
            .filter_map(|(link, result)| async move {
                match result {
                    Ok(details) => Some(details),
                    Err(e) => {
                        warn!("Error fetching assessment details for {link}: {e}");
                        None
                    }
                }
            })
            .collect()
            .await
    }
}
