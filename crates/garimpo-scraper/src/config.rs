/// Tunables for the scraping engine.
///
/// The defaults carry realistic browser user-agents: storefronts serve
/// stripped-down or blocked pages to obvious bot UAs, and some (Amazon,
/// Shopee) expose more scrapable markup to their mobile sites, so strategies
/// pick between the desktop and mobile strings per store.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Total per-request timeout, in seconds.
    pub timeout_secs: u64,
    pub desktop_user_agent: String,
    pub mobile_user_agent: String,
    /// Sent on every page fetch; Brazilian storefronts localize price markup
    /// based on it.
    pub accept_language: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            desktop_user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                 AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            mobile_user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) \
                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1"
                .to_string(),
            accept_language: "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
        }
    }
}
