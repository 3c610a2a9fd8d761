//! Amazon strategy: ASIN canonicalization, block detection, and the layered
//! price/image selector chains the retail pages need.

use regex::Regex;
use scraper::Html;

use crate::config::ScraperConfig;
use crate::dom::{self, Rule};
use crate::error::ScrapeError;
use crate::fetch::{self, UserAgent};
use crate::image::normalize_image_url;
use crate::jsonld;
use crate::price::parse_price;
use crate::types::ScrapedData;

/// Substrings that identify Amazon's robot-check interstitial.
const CAPTCHA_MARKERS: &[&str] = &["validateCaptcha", "Robot Check"];

const CAPTCHA_MESSAGE: &str =
    "Amazon exigiu CAPTCHA. Por favor, adicione os dados manualmente.";

/// ASIN-bearing path shapes, tried in order.
const ASIN_PATTERNS: &[&str] = &[
    r"(?i)/dp/([A-Z0-9]{10})",
    r"(?i)/gp/product/([A-Z0-9]{10})",
    r"(?i)/d/([A-Z0-9]{10})",
];

const TITLE_RULES: &[Rule] = &[
    Rule::Text("#productTitle"),
    Rule::Attr(r#"meta[property="og:title"]"#, "content"),
    Rule::Attr(r#"meta[name="title"]"#, "content"),
    Rule::Text("title"),
];

const IMAGE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:image"]"#, "content"),
    Rule::Attr("#landingImage", "src"),
    Rule::Attr("#imgBlkFront", "src"),
    Rule::Attr("img#landingImage", "data-old-hires"),
    Rule::Attr(".a-dynamic-image", "src"),
];

/// Deal/offer price blocks, consulted when the whole/fraction pair is absent.
const PRICE_FALLBACK_SELECTORS: &[&str] = &[
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price .a-offscreen",
    r#"[data-a-color="price"] .a-offscreen"#,
];

/// Strikethrough list-price blocks.
const LIST_PRICE_SELECTORS: &[&str] = &[
    ".a-text-price .a-offscreen",
    "#listPrice",
    r#".a-price[data-a-strike="true"] .a-offscreen"#,
];

pub(super) async fn scrape(
    client: &reqwest::Client,
    config: &ScraperConfig,
    url: &str,
) -> Result<ScrapedData, ScrapeError> {
    // Re-request the canonical product URL when an ASIN is present: it sheds
    // query-string tracking noise and shortlink indirection.
    let target = match extract_asin(url) {
        Some(asin) => {
            tracing::debug!(url, asin = %asin, "canonicalized Amazon URL");
            format!("https://www.amazon.com.br/dp/{asin}")
        }
        None => url.to_string(),
    };

    let html = match fetch::fetch_page(client, config, &target, UserAgent::Mobile).await {
        Ok(html) => html,
        Err(ScrapeError::Status { status }) => {
            // Amazon answers automated traffic with errors far more often
            // than with real outages; keep the status visible but tell the
            // admin what to do about it.
            return Err(ScrapeError::BotBlocked {
                message: format!(
                    "Amazon bloqueou a requisição (HTTP {status}). \
                     Por favor, adicione os dados manualmente."
                ),
            });
        }
        Err(err) => return Err(err),
    };

    if CAPTCHA_MARKERS.iter().any(|marker| html.contains(marker)) {
        tracing::debug!(url = %target, "Amazon served a robot check");
        return Err(ScrapeError::BotBlocked {
            message: CAPTCHA_MESSAGE.to_string(),
        });
    }

    Ok(extract(&html, &target))
}

/// Extracts the 10-character product identifier from the URL path.
fn extract_asin(url: &str) -> Option<String> {
    for pattern in ASIN_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(cap) = re.captures(url) {
            return Some(cap[1].to_uppercase());
        }
    }
    None
}

/// Pure extraction over fetched HTML; deterministic for a fixed input.
fn extract(html: &str, url: &str) -> ScrapedData {
    let doc = Html::parse_document(html);

    let mut title = dom::first_match(&doc, TITLE_RULES);
    let mut image = dom::first_match(&doc, IMAGE_RULES);

    // The responsive-image attribute usually holds higher resolutions than
    // any single <img> src.
    if let Some(raw) = dom::select_attr(&doc, "[data-a-dynamic-image]", "data-a-dynamic-image") {
        if let Some(largest) = pick_largest_dynamic_image(&raw) {
            image = Some(largest);
        }
    }

    let mut price = whole_fraction_price(&doc).or_else(|| {
        PRICE_FALLBACK_SELECTORS
            .iter()
            .find_map(|s| dom::select_text(&doc, s).as_deref().and_then(parse_price))
            .filter(|p| *p > 0.0)
    });

    let original_price = LIST_PRICE_SELECTORS
        .iter()
        .find_map(|s| dom::select_text(&doc, s).as_deref().and_then(parse_price))
        .filter(|p| *p > 0.0);

    // Structured data last, for whatever the selectors missed.
    if title.is_none() || image.is_none() || price.is_none() {
        if let Some(product) = jsonld::extract_product(html) {
            title = title.or(product.name);
            image = image.or(product.image);
            price = price.or(product.price);
        }
    }

    let image = image.map(|i| normalize_image_url(&i, url));
    ScrapedData::from_parts(title, image, None, price, original_price)
}

/// Joins the `.a-price-whole` / `.a-price-fraction` fragments into one
/// decimal value. The fraction defaults to `00` when missing.
fn whole_fraction_price(doc: &Html) -> Option<f64> {
    let whole: String = dom::select_text(doc, ".a-price-whole")?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if whole.is_empty() {
        return None;
    }

    let fraction = dom::select_text(doc, ".a-price-fraction")
        .map(|f| f.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "00".to_string());

    format!("{whole}.{fraction}").parse().ok()
}

/// Picks the URL with the largest first dimension from Amazon's
/// `data-a-dynamic-image` JSON map (`{url: [width, height], …}`).
///
/// The map shape is observed, not documented; if Amazon changes it this
/// returns `None` and the `<img>`-based fallbacks stand.
fn pick_largest_dynamic_image(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let map = value.as_object()?;

    map.iter()
        .map(|(url, dims)| {
            let width = dims
                .as_array()
                .and_then(|a| a.first())
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0);
            (url, width)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(url, _)| url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // -----------------------------------------------------------------------
    // ASIN extraction
    // -----------------------------------------------------------------------

    #[test]
    fn asin_from_dp_path() {
        assert_eq!(
            extract_asin("https://www.amazon.com.br/Produto/dp/B0ABC12345?tag=x").as_deref(),
            Some("B0ABC12345")
        );
    }

    #[test]
    fn asin_from_gp_product_path() {
        assert_eq!(
            extract_asin("https://www.amazon.com.br/gp/product/B0XYZ98765").as_deref(),
            Some("B0XYZ98765")
        );
    }

    #[test]
    fn asin_from_short_d_path() {
        assert_eq!(
            extract_asin("https://amzn.com/d/b0abc12345").as_deref(),
            Some("B0ABC12345")
        );
    }

    #[test]
    fn no_asin_in_search_url() {
        assert_eq!(extract_asin("https://www.amazon.com.br/s?k=fone"), None);
    }

    // -----------------------------------------------------------------------
    // Dynamic image map
    // -----------------------------------------------------------------------

    // The {url: [width, height]} shape is reverse-engineered from live
    // pages; revalidate against fresh fixtures when this starts failing.
    #[test]
    fn dynamic_image_picks_largest_first_dimension() {
        let raw = r#"{
            "https://m.media-amazon.com/small.jpg": [342, 445],
            "https://m.media-amazon.com/large.jpg": [679, 883],
            "https://m.media-amazon.com/medium.jpg": [466, 606]
        }"#;
        assert_eq!(
            pick_largest_dynamic_image(raw).as_deref(),
            Some("https://m.media-amazon.com/large.jpg")
        );
    }

    #[test]
    fn dynamic_image_tolerates_malformed_json() {
        assert_eq!(pick_largest_dynamic_image("{not json"), None);
        assert_eq!(pick_largest_dynamic_image("[1, 2]"), None);
    }

    // -----------------------------------------------------------------------
    // HTML extraction
    // -----------------------------------------------------------------------

    const PRODUCT_PAGE: &str = r#"
        <html><head><title>Echo Dot : Amazon.com.br</title></head>
        <body>
            <span id="productTitle"> Echo Dot 5ª geração | Amazon.com.br </span>
            <img id="landingImage" src="https://m.media-amazon.com/echo.jpg">
            <span class="a-price-whole">299<span class="a-price-decimal">,</span></span>
            <span class="a-price-fraction">90</span>
            <span class="a-text-price"><span class="a-offscreen">R$ 399,90</span></span>
        </body></html>
    "#;

    #[test]
    fn extracts_title_price_and_list_price() {
        let data = extract(PRODUCT_PAGE, "https://www.amazon.com.br/dp/B0ABC12345");
        assert!(data.success);
        assert_eq!(data.title.as_deref(), Some("Echo Dot 5ª geração"));
        assert_eq!(data.image.as_deref(), Some("https://m.media-amazon.com/echo.jpg"));
        assert_eq!(data.price, Some(299.90));
        assert_eq!(data.original_price, Some(399.90));
    }

    #[test]
    fn offscreen_fallback_when_no_whole_fraction() {
        let html = r#"
            <html><body>
            <span id="productTitle">Kindle</span>
            <span class="a-price"><span class="a-offscreen">R$ 449,00</span></span>
            </body></html>
        "#;
        let data = extract(html, "https://www.amazon.com.br/dp/B0ABC12345");
        assert_eq!(data.price, Some(449.0));
    }

    #[test]
    fn jsonld_backfills_missing_fields() {
        let html = r#"
            <html><body>
            <script type="application/ld+json">
            {"@type": "Product", "name": "Fire TV Stick",
             "image": "https://m.media-amazon.com/fire.jpg",
             "offers": {"price": "379.00"}}
            </script>
            </body></html>
        "#;
        let data = extract(html, "https://www.amazon.com.br/dp/B0ABC12345");
        assert_eq!(data.title.as_deref(), Some("Fire TV Stick"));
        assert_eq!(data.image.as_deref(), Some("https://m.media-amazon.com/fire.jpg"));
        assert_eq!(data.price, Some(379.0));
    }

    #[test]
    fn extraction_is_deterministic() {
        let a = extract(PRODUCT_PAGE, "https://www.amazon.com.br/dp/B0ABC12345");
        let b = extract(PRODUCT_PAGE, "https://www.amazon.com.br/dp/B0ABC12345");
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // Block detection (wiremock; URLs without an ASIN are fetched as-is)
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn captcha_page_is_reported_as_bot_blocked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bloqueado"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body>Digite os caracteres: validateCaptcha</body></html>",
            ))
            .mount(&server)
            .await;

        let config = ScraperConfig::default();
        let client = crate::fetch::build_client(&config).unwrap();
        let err = scrape(&client, &config, &format!("{}/bloqueado", server.uri()))
            .await
            .unwrap_err();

        match err {
            ScrapeError::BotBlocked { message } => {
                assert!(message.contains("manualmente"), "got: {message}");
            }
            other => panic!("expected BotBlocked, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_error_keeps_status_and_guidance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/erro"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = ScraperConfig::default();
        let client = crate::fetch::build_client(&config).unwrap();
        let err = scrape(&client, &config, &format!("{}/erro", server.uri()))
            .await
            .unwrap_err();

        match err {
            ScrapeError::BotBlocked { message } => {
                assert!(message.contains("503"), "got: {message}");
                assert!(message.contains("manualmente"), "got: {message}");
            }
            other => panic!("expected BotBlocked, got: {other:?}"),
        }
    }
}
