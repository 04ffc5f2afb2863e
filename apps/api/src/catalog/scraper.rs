//! Catalog scraper: fetches search result and product pages and extracts
//! assessment links and details from their HTML.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::catalog::models::{parse_duration_minutes, split_list, AssessmentDetails};
use crate::catalog::CatalogError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch-and-extract capability over the assessment catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Assessment page URLs listed on one search result page.
    async fn search(&self, url: &str) -> Result<Vec<String>, CatalogError>;

    /// Details scraped from one assessment page.
    async fn details(&self, url: &str) -> Result<AssessmentDetails, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// HTTP-backed `CatalogSource` for the live catalog site.
#[derive(Clone)]
pub struct CatalogScraper {
    client: Client,
    base_url: Url,
    settings: ScraperSettings,
}

impl CatalogScraper {
    pub fn new(base_url: Url, settings: ScraperSettings) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// GETs a page, retrying with a fixed delay until `max_retries` attempts are spent.
    async fn fetch_html(&self, url: &str) -> Result<String, CatalogError> {
        let attempts = self.settings.max_retries.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts => {
                    warn!("Attempt {attempt}/{attempts} failed for {url}: {e}");
                    tokio::time::sleep(self.settings.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Failed to fetch catalog page after {attempts} attempts: {url}");
                    return Err(e);
                }
            }
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogScraper {
    async fn search(&self, url: &str) -> Result<Vec<String>, CatalogError> {
        info!("Fetching catalog search page: {url}");
        let html = self.fetch_html(url).await?;
        let links = extract_listing_links(&html, &self.base_url)?;
        debug!(url, count = links.len(), "Extracted assessment links");
        Ok(links)
    }

    async fn details(&self, url: &str) -> Result<AssessmentDetails, CatalogError> {
        let html = self.fetch_html(url).await?;
        extract_details(&html, url)
    }
}

fn selector(css: &'static str) -> Result<Selector, CatalogError> {
    Selector::parse(css).map_err(|e| CatalogError::Selector(format!("{css}: {e:?}")))
}

/// Text content with every text node trimmed and the pieces concatenated.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect::<Vec<_>>().join("")
}

/// Assessment links from a search result page, resolved against `base_url`.
///
/// Each result table's header row is skipped; rows with fewer than four cells
/// or without a link in the first cell are ignored.
pub fn extract_listing_links(html: &str, base_url: &Url) -> Result<Vec<String>, CatalogError> {
    let container_sel = selector("div.custom__table-responsive")?;
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let link_sel = selector("a[href]")?;

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for container in document.select(&container_sel) {
        let Some(table) = container.select(&table_sel).next() else {
            warn!("Could not find table inside a responsive div");
            continue;
        };

        for row in table.select(&row_sel).skip(1) {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            if cells.len() < 4 {
                continue;
            }
            let Some(href) = cells[0]
                .select(&link_sel)
                .next()
                .and_then(|link| link.value().attr("href"))
            else {
                continue;
            };

            match base_url.join(href) {
                Ok(full) => links.push(full.to_string()),
                Err(e) => warn!("Skipping unresolvable link '{href}': {e}"),
            }
        }
    }

    Ok(links)
}

/// Details from an assessment product page.
pub fn extract_details(html: &str, url: &str) -> Result<AssessmentDetails, CatalogError> {
    let row_sel = selector(".product-catalogue-training-calendar__row")?;
    let heading_sel = selector("h4")?;
    let paragraph_sel = selector("p")?;
    let key_sel = selector(".product-catalogue__key")?;
    let remote_yes_sel = selector("span.catalogue__circle.-yes")?;

    let document = Html::parse_document(html);
    let mut details = AssessmentDetails {
        url: url.to_string(),
        remote_testing: "No".to_string(),
        ..Default::default()
    };

    for row in document.select(&row_sel) {
        let (Some(heading), Some(content)) = (
            row.select(&heading_sel).next(),
            row.select(&paragraph_sel).next(),
        ) else {
            continue;
        };

        let title = element_text(heading).to_lowercase();
        let value = element_text(content);

        if title.contains("description") {
            details.description = Some(value);
        } else if title.contains("job level") {
            details.job_levels = split_list(&value);
        } else if title.contains("language") {
            details.languages = split_list(&value);
        } else if title.contains("assessment length") {
            details.duration_minutes = Some(parse_duration_minutes(&value));
            details.assessment_time = Some(value);
        }
    }

    details.test_type = document
        .select(&key_sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());

    let remote = document.select(&paragraph_sel).any(|p| {
        element_text(p).contains("Remote Testing") && p.select(&remote_yes_sel).next().is_some()
    });
    if remote {
        details.remote_testing = "Yes".to_string();
    }

    Ok(details)
}
