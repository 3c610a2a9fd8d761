//! Storefront dispatch and per-store extraction strategies.
//!
//! Each supported store lives in its own module exposing
//! `scrape(client, config, url)`; [`dispatch`] routes to the right one based
//! on [`Storefront::classify`], and everything else falls through to the
//! generic Open Graph strategy.

mod amazon;
mod generic;
mod magalu;
mod mercado_livre;
mod shopee;

pub use shopee::PRICE_MICRO_UNITS as SHOPEE_PRICE_MICRO_UNITS;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::types::ScrapedData;

/// The closed set of storefronts with bespoke extraction logic.
///
/// Narrower than the display classifier in `garimpo-core`: a store appears
/// here only when the generic strategy cannot handle its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storefront {
    Shopee,
    Amazon,
    MercadoLivre,
    Magalu,
    Generic,
}

const SHOPEE_HOSTS: &[&str] = &["shopee.com", "s.shopee"];
const AMAZON_HOSTS: &[&str] = &["amazon.com", "amzn.to", "amzn.com"];
const MERCADO_LIVRE_HOSTS: &[&str] = &["mercadolivre.com", "mercadolibre.com", "mlstatic.com"];
const MAGALU_HOSTS: &[&str] = &["magazineluiza.com", "magalu.com"];

impl Storefront {
    /// Picks the strategy for a (redirect-resolved) URL.
    ///
    /// Matches substrings of the parsed hostname so a query-string mention
    /// of another store cannot misroute dispatch; URLs that do not parse are
    /// matched against the raw string as a last resort.
    #[must_use]
    pub fn classify(url: &str) -> Self {
        let host = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase));
        let haystack = host.unwrap_or_else(|| url.to_lowercase());

        let contains_any = |hosts: &[&str]| hosts.iter().any(|h| haystack.contains(h));

        if contains_any(SHOPEE_HOSTS) {
            Self::Shopee
        } else if contains_any(AMAZON_HOSTS) {
            Self::Amazon
        } else if contains_any(MERCADO_LIVRE_HOSTS) {
            Self::MercadoLivre
        } else if contains_any(MAGALU_HOSTS) {
            Self::Magalu
        } else {
            Self::Generic
        }
    }

    /// Renders a strategy error as the admin-facing diagnostic.
    ///
    /// Bot-block and unusable-link errors already carry a complete message;
    /// everything else gets a store-naming prefix so the admin knows which
    /// scraper gave up (the generic strategy passes the bare message).
    pub(crate) fn describe_error(self, err: &ScrapeError) -> String {
        if matches!(
            err,
            ScrapeError::BotBlocked { .. } | ScrapeError::UnusableLink { .. }
        ) {
            return err.to_string();
        }
        match self {
            Self::Shopee => format!("Erro ao processar link da Shopee: {err}"),
            Self::Amazon => format!("Erro ao processar link da Amazon: {err}"),
            Self::MercadoLivre => format!("Erro ao processar link do Mercado Livre: {err}"),
            Self::Magalu => format!("Erro ao processar link da Magalu: {err}"),
            Self::Generic => err.to_string(),
        }
    }
}

impl std::fmt::Display for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Shopee => "Shopee",
            Self::Amazon => "Amazon",
            Self::MercadoLivre => "Mercado Livre",
            Self::Magalu => "Magalu",
            Self::Generic => "generic",
        };
        write!(f, "{name}")
    }
}

/// Runs the strategy for `storefront` against `url`.
///
/// # Errors
///
/// Propagates the strategy's [`ScrapeError`]; the caller folds it into the
/// failure envelope.
pub(crate) async fn dispatch(
    client: &reqwest::Client,
    config: &ScraperConfig,
    storefront: Storefront,
    url: &str,
) -> Result<ScrapedData, ScrapeError> {
    match storefront {
        Storefront::Shopee => shopee::scrape(client, config, url).await,
        Storefront::Amazon => amazon::scrape(client, config, url).await,
        Storefront::MercadoLivre => mercado_livre::scrape(client, config, url).await,
        Storefront::Magalu => magalu::scrape(client, config, url).await,
        Storefront::Generic => generic::scrape(client, config, url).await,
    }
}
