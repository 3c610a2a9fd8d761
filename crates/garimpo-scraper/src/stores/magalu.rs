//! Magazine Luiza strategy: meta tags plus the price-value test-id markup.

use scraper::Html;

use crate::config::ScraperConfig;
use crate::dom::{self, Rule};
use crate::error::ScrapeError;
use crate::fetch::{self, UserAgent};
use crate::image::normalize_image_url;
use crate::jsonld;
use crate::price::parse_price;
use crate::types::ScrapedData;

const TITLE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:title"]"#, "content"),
    Rule::Text(r#"h1[data-testid="heading-product-title"]"#),
    Rule::Text("title"),
];

const IMAGE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:image"]"#, "content"),
    Rule::Attr(r#"meta[name="twitter:image"]"#, "content"),
];

const PRICE_SELECTORS: &[&str] = &[
    r#"[data-testid="price-value"]"#,
    ".price-template__text",
];

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

    let mut price = PRICE_SELECTORS
        .iter()
        .find_map(|s| dom::select_text(&doc, s).as_deref().and_then(parse_price))
        .filter(|p| *p > 0.0);

    if price.is_none() {
        if let Some(product) = jsonld::extract_product(html) {
            price = product.price;
        }
    }

    ScrapedData::from_parts(title, image, None, price, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><head>
            <meta property="og:title" content="Air Fryer Philco 4L - Magazine Luiza">
            <meta property="og:image" content="https://a-static.mlcdn.com.br/airfryer.jpg">
        </head><body>
            <h1 data-testid="heading-product-title">Air Fryer Philco 4L</h1>
            <p data-testid="price-value">R$ 379,90</p>
        </body></html>
    "#;

    #[test]
    fn extracts_meta_and_test_id_price() {
        let data = extract(PRODUCT_PAGE, "https://www.magazineluiza.com.br/p/123");
        assert!(data.success);
        assert_eq!(data.title.as_deref(), Some("Air Fryer Philco 4L"));
        assert_eq!(
            data.image.as_deref(),
            Some("https://a-static.mlcdn.com.br/airfryer.jpg")
        );
        assert_eq!(data.price, Some(379.90));
        assert_eq!(data.original_price, None);
    }

    #[test]
    fn template_text_fallback() {
        let html = r#"
            <html><body>
            <div class="price-template__text">299,00</div>
            </body></html>
        "#;
        let data = extract(html, "https://www.magazineluiza.com.br/p/456");
        assert_eq!(data.price, Some(299.0));
    }

    #[test]
    fn jsonld_backfills_missing_price() {
        let html = r#"
            <html><head>
            <meta property="og:title" content="Geladeira Brastemp">
            <script type="application/ld+json">
            {"@type": "Product", "name": "Geladeira Brastemp", "offers": {"price": "2899.00"}}
            </script>
            </head></html>
        "#;
        let data = extract(html, "https://www.magazineluiza.com.br/p/789");
        assert_eq!(data.price, Some(2899.0));
    }

    #[test]
    fn extraction_is_deterministic() {
        let a = extract(PRODUCT_PAGE, "https://www.magazineluiza.com.br/p/123");
        let b = extract(PRODUCT_PAGE, "https://www.magazineluiza.com.br/p/123");
        assert_eq!(a, b);
    }
}
