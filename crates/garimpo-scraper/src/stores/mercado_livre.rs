//! Mercado Livre strategy.
//!
//! Price extraction leans on accessibility labels before visual selectors:
//! the `aria-label` text ("Agora: 78 reais com 90 centavos") survives the
//! A/B-tested layout variations that keep renaming the price markup.

use scraper::{Html, Selector};

use crate::config::ScraperConfig;
use crate::dom::{self, Rule};
use crate::error::ScrapeError;
use crate::fetch::{self, UserAgent};
use crate::image::normalize_image_url;
use crate::jsonld;
use crate::price::{parse_price, parse_reais_label};
use crate::types::ScrapedData;

const TITLE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:title"]"#, "content"),
    Rule::Text("h1.ui-pdp-title"),
    Rule::Text("title"),
];

const IMAGE_RULES: &[Rule] = &[
    Rule::Attr(r#"meta[property="og:image"]"#, "content"),
    Rule::Attr(r#"meta[name="twitter:image"]"#, "content"),
    Rule::Attr("figure.ui-pdp-gallery__figure img", "src"),
    Rule::Attr("img.ui-pdp-image", "src"),
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
    let mut image = dom::first_match(&doc, IMAGE_RULES);

    let original_price = prefixed_label_price(&doc, "Antes:");

    let mut price = prefixed_label_price(&doc, "Agora:")
        .or_else(|| cents_superscript_price(&doc))
        .or_else(|| {
            dom::meta_content(&doc, r#"meta[itemprop="price"]"#)
                .as_deref()
                .and_then(parse_price)
        })
        .or_else(|| any_reais_label_price(&doc));

    if price.is_none() || image.is_none() {
        if let Some(product) = jsonld::extract_product(html) {
            price = price.or(product.price);
            image = image.or(product.image);
        }
    }

    let image = image.map(|i| normalize_image_url(&i, url));
    ScrapedData::from_parts(title, image, None, price, original_price)
}

/// Price from the first `aria-label` starting with `prefix`.
fn prefixed_label_price(doc: &Html, prefix: &str) -> Option<f64> {
    let selector = Selector::parse("[aria-label]").expect("valid selector");
    let label = doc
        .select(&selector)
        .filter_map(|el| el.value().attr("aria-label"))
        .find(|label| label.starts_with(prefix))?;
    parse_reais_label(label)
}

/// Last-ditch label scan: any `aria-label` mentioning "reais" that is not
/// the strikethrough "Antes:" price.
fn any_reais_label_price(doc: &Html) -> Option<f64> {
    let selector = Selector::parse("[aria-label]").expect("valid selector");
    let label = doc
        .select(&selector)
        .filter_map(|el| el.value().attr("aria-label"))
        .find(|label| label.contains("reais") && !label.starts_with("Antes:"))?;
    parse_reais_label(label)
}

/// Visual fallback: the fraction/cents pair inside the superscript-cents
/// money block (`1.234` + `56` → `1234.56`).
fn cents_superscript_price(doc: &Html) -> Option<f64> {
    let container_sel =
        Selector::parse(".andes-money-amount--cents-superscript").expect("valid selector");
    let fraction_sel = Selector::parse(".andes-money-amount__fraction").expect("valid selector");
    let cents_sel = Selector::parse(".andes-money-amount__cents").expect("valid selector");

    let container = doc.select(&container_sel).next()?;

    let fraction: String = container.select(&fraction_sel).next()?.text().collect();
    let fraction = fraction.trim().replace('.', "");
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let cents = container
        .select(&cents_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "00".to_string());

    format!("{fraction}.{cents}").parse().ok()
}
