mod catalog;
mod config;
mod errors;
mod filters;
mod llm_client;
mod recommendation;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::catalog::snapshot::inspect_previous_snapshot;
use crate::catalog::{CatalogScraper, ScraperSettings};
use crate::config::Config;
use crate::filters::normalizer::NormalizationMode;
use crate::filters::CatalogVocabulary;
use crate::llm_client::LlmClient;
use crate::recommendation::RecommendationPipeline;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Assessment Recommender v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the catalog vocabulary
    let vocabulary = match &config.vocabulary_path {
        Some(path) => CatalogVocabulary::from_path(path),
        None => CatalogVocabulary::embedded(),
    }
    .context("Failed to load catalog vocabulary")?;
    info!("Catalog vocabulary loaded (version: {})", vocabulary.version);

    if let Some(path) = &config.snapshot_path {
        inspect_previous_snapshot(path, &vocabulary.version);
    }

    // Initialize catalog scraper
    let base_url = Url::parse(&vocabulary.base_url)?;
    let catalog = CatalogScraper::new(
        base_url,
        ScraperSettings {
            max_retries: config.catalog_max_retries,
            retry_delay: config.catalog_retry_delay,
        },
    )?;
    info!("Catalog scraper initialized ({})", vocabulary.base_url);

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let normalization = if config.strict_vocabulary {
        NormalizationMode::Strict
    } else {
        NormalizationMode::Lenient
    };
    info!("Vocabulary normalization: {normalization:?}");

    let pipeline = RecommendationPipeline {
        completion: Arc::new(llm),
        catalog: Arc::new(catalog),
        vocabulary: Arc::new(vocabulary),
        normalization,
        limit: config.recommendation_limit,
        snapshot_path: config.snapshot_path.clone(),
    };

    // Build app state
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
