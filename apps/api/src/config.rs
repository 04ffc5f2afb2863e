use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Overrides the vocabulary asset compiled into the binary.
    pub vocabulary_path: Option<PathBuf>,
    /// Drop enumerated answers the vocabulary does not know instead of title-casing them.
    pub strict_vocabulary: bool,
    /// Where each request's gathered assessments are written, if anywhere.
    pub snapshot_path: Option<PathBuf>,
    pub catalog_max_retries: u32,
    pub catalog_retry_delay: Duration,
    pub recommendation_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            vocabulary_path: optional_env("CATALOG_VOCABULARY_PATH").map(PathBuf::from),
            strict_vocabulary: parse_env("STRICT_VOCABULARY", false)?,
            snapshot_path: optional_env("SNAPSHOT_PATH").map(PathBuf::from),
            catalog_max_retries: parse_env("CATALOG_MAX_RETRIES", 3)?,
            catalog_retry_delay: Duration::from_millis(parse_env("CATALOG_RETRY_DELAY_MS", 2000)?),
            recommendation_limit: parse_env("RECOMMENDATION_LIMIT", 10)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
