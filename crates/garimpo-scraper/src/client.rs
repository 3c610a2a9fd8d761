use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::fetch;
use crate::stores::{self, Storefront};
use crate::types::ScrapedData;

/// The scraping engine: one shared HTTP client plus the storefront dispatch.
///
/// Safe to share across tasks and call concurrently for distinct URLs —
/// each scrape is an independent short sequence of at most two outbound
/// requests (the optional redirect probe and the page fetch) with no shared
/// mutable state.
pub struct Scraper {
    http: reqwest::Client,
    config: ScraperConfig,
}

impl Scraper {
    /// Creates a `Scraper` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let http = fetch::build_client(&config)?;
        Ok(Self { http, config })
    }

    /// Scrapes product data from any syntactically valid absolute URL.
    ///
    /// Resolves shortlink redirects, classifies the final URL into a
    /// [`Storefront`], runs that store's extraction strategy, and folds any
    /// failure into the result envelope. Total over its input domain: every
    /// error — DNS, timeout, non-2xx, bot block, unusable link — comes back
    /// as `success = false` with a diagnostic; nothing is thrown past this
    /// method. Partial data with `success = true` is the expected common
    /// case and means the caller should prompt for the missing fields.
    pub async fn scrape_url(&self, url: &str) -> ScrapedData {
        let resolved = fetch::resolve_redirects(&self.http, &self.config, url).await;
        let storefront = Storefront::classify(&resolved);
        tracing::debug!(url, resolved = %resolved, storefront = %storefront, "dispatching scrape");

        match stores::dispatch(&self.http, &self.config, storefront, &resolved).await {
            Ok(data) => data,
            Err(err) => {
                tracing::debug!(resolved = %resolved, error = %err, "scrape failed");
                ScrapedData::failure(storefront.describe_error(&err))
            }
        }
    }
}
