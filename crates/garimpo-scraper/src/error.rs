use thiserror::Error;

/// Failures raised inside an extraction strategy.
///
/// Nothing here escapes [`crate::Scraper::scrape_url`]: the dispatcher folds
/// every variant into a failed [`crate::ScrapedData`] envelope. The Display
/// strings double as the admin-facing diagnostics, so the block/unusable
/// variants carry complete Portuguese messages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The storefront served a CAPTCHA or robot-check page instead of the
    /// product. The message tells the admin to enter the data manually.
    #[error("{message}")]
    BotBlocked { message: String },

    /// The link itself cannot identify a product (as opposed to the network
    /// failing), e.g. a Shopee URL with no shop/item ids.
    #[error("{message}")]
    UnusableLink { message: String },
}
