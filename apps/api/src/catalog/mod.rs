// Catalog access: search/product page scraping and flat snapshot files.

pub mod models;
pub mod scraper;
pub mod snapshot;

use thiserror::Error;

pub use models::AssessmentDetails;
pub use self::scraper::{CatalogScraper, CatalogSource, ScraperSettings};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid selector {0}")]
    Selector(String),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
