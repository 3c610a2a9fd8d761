//! Fallback strategy: Open Graph metadata plus a layered price sweep.

use regex::Regex;
use scraper::Html;

use crate::config::ScraperConfig;
use crate::dom::{self, Rule};
use crate::error::ScrapeError;
use crate::fetch::{self, UserAgent};
use crate::image::normalize_image_url;
use crate::price::parse_price;
use crate::types::ScrapedData;

const TITLE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:title"]"#, "content"),
    Rule::Attr(r#"meta[name="twitter:title"]"#, "content"),
    Rule::Text("title"),
    Rule::Text("h1"),
];

const IMAGE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:image"]"#, "content"),
    Rule::Attr(r#"meta[name="twitter:image"]"#, "content"),
    Rule::Attr("img", "src"),
];

const DESCRIPTION_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:description"]"#, "content"),
    Rule::Attr(r#"meta[name="description"]"#, "content"),
    Rule::Attr(r#"meta[name="twitter:description"]"#, "content"),
];

/// Selectors commonly used for price display across storefronts, in
/// decreasing order of confidence. Each is probed for element text, then
/// `content`, then `data-price`.
const PRICE_SELECTORS: &[&str] = &[
    ".price",
    ".a-price-whole",
    "[data-price]",
    ".price-tag",
    ".product-price",
    ".sale-price",
    r#"[itemprop="price"]"#,
    ".current-price",
    ".andes-money-amount__fraction",
];

/// Currency-prefixed and JSON-keyed price patterns for the raw-HTML scan.
const RAW_PRICE_PATTERNS: &[&str] = &[
    r"(?i)R\$\s*(\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2})?)",
    r"(?i)BRL\s*(\d+[.,]\d{2})",
    r#""price":\s*(\d+\.?\d*)"#,
    r#""amount":\s*(\d+\.?\d*)"#,
    r#""salePrice":\s*(\d+\.?\d*)"#,
];

/// Raw-scan matches outside this range are rejected as noise (product ids,
/// timestamps and the like routinely match the JSON patterns).
const MAX_PLAUSIBLE_PRICE: f64 = 1_000_000.0;

pub(super) async fn scrape(
    client: &reqwest::Client,
    config: &ScraperConfig,
    url: &str,
) -> Result<ScrapedData, ScrapeError> {
    let html = fetch::fetch_page(client, config, url, UserAgent::Desktop).await?;
    Ok(extract(&html, url))
}

/// Pure extraction over fetched HTML; deterministic for a fixed input.
fn extract(html: &str, url: &str) -> ScrapedData {
    let doc = Html::parse_document(html);

    let title = dom::first_match(&doc, TITLE_RULES);
    let image = dom::first_match(&doc, IMAGE_RULES).map(|i| normalize_image_url(&i, url));
    let description = dom::first_match(&doc, DESCRIPTION_RULES);
    let price = extract_price(&doc, html);

    ScrapedData::from_parts(title, image, description, price, None)
}

fn extract_price(doc: &Html, html: &str) -> Option<f64> {
    for selector in PRICE_SELECTORS {
        if let Some(price) = dom::price_text(doc, selector)
            .as_deref()
            .and_then(parse_price)
            .filter(|p| *p > 0.0)
        {
            return Some(price);
        }
    }
    scan_raw_prices(html)
}

fn scan_raw_prices(html: &str) -> Option<f64> {
    for pattern in RAW_PRICE_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        for cap in re.captures_iter(html) {
            let Some(m) = cap.get(1) else { continue };
            if let Some(price) =
                parse_price(m.as_str()).filter(|p| *p > 0.0 && *p < MAX_PLAUSIBLE_PRICE)
            {
                return Some(price);
            }
        }
    }
    None
}
