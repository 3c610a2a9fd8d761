//! Low-level HTTP plumbing shared by every extraction strategy.

use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Which browser identity a strategy presents. Amazon and Shopee serve more
/// scrapable markup on their mobile sites; the others get the desktop UA.
#[derive(Debug, Clone, Copy)]
pub(crate) enum UserAgent {
    Desktop,
    Mobile,
}

/// Builds the shared `reqwest::Client` with the configured timeout.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the client cannot be constructed
/// (e.g., invalid TLS config).
pub(crate) fn build_client(config: &ScraperConfig) -> Result<reqwest::Client, ScrapeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Fetches a page body with browser-like headers.
///
/// # Errors
///
/// - [`ScrapeError::Status`] — non-2xx response.
/// - [`ScrapeError::Http`] — network, timeout, or body-read failure.
pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    config: &ScraperConfig,
    url: &str,
    user_agent: UserAgent,
) -> Result<String, ScrapeError> {
    let ua = match user_agent {
        UserAgent::Desktop => &config.desktop_user_agent,
        UserAgent::Mobile => &config.mobile_user_agent,
    };

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, ua)
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header(reqwest::header::ACCEPT_LANGUAGE, &config.accept_language)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// Follows shortlink/redirect chains to the final URL via a HEAD probe.
///
/// Best-effort only: any failure returns the original URL unchanged, since
/// classification can still work on the raw link and the page fetch will
/// follow redirects itself.
pub(crate) async fn resolve_redirects(
    client: &reqwest::Client,
    config: &ScraperConfig,
    url: &str,
) -> String {
    match client
        .head(url)
        .header(reqwest::header::USER_AGENT, &config.desktop_user_agent)
        .send()
        .await
    {
        Ok(response) => {
            let resolved = response.url().to_string();
            if resolved != url {
                tracing::debug!(url, resolved = %resolved, "followed redirect chain");
            }
            resolved
        }
        Err(err) => {
            tracing::debug!(url, error = %err, "redirect probe failed; keeping original URL");
            url.to_string()
        }
    }
}
