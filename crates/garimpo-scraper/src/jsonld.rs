//! Last-resort backfill from schema.org JSON-LD product metadata.

use regex::Regex;

/// Product fields recovered from a `<script type="application/ld+json">`
/// block. Everything is optional; strategies only consult this for fields
/// their selector chains missed.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct JsonLdProduct {
    pub(crate) name: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) price: Option<f64>,
}

/// Scans every JSON-LD block in `html` for the first `Product` object.
///
/// Tolerates top-level arrays and `@graph` containers, `@type` as a string
/// or an array, `image` as a string or array of strings, and `offers` as an
/// object or array with `price` as a number or numeric string. Malformed
/// blocks are skipped silently — embedded data is untrusted and frequently
/// truncated.
pub(crate) fn extract_product(html: &str) -> Option<JsonLdProduct> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    for cap in script_re.captures_iter(html) {
        let Some(json_text) = cap.get(1) else { continue };

        let value: serde_json::Value = match serde_json::from_str(json_text.as_str()) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let mut candidates: Vec<serde_json::Value> = if let Some(arr) = value.as_array() {
            arr.clone()
        } else {
            vec![value]
        };

        // Many sites nest structured data inside a top-level {"@graph": [...]}.
        let mut expanded = Vec::new();
        for item in &candidates {
            if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                expanded.extend(graph.iter().cloned());
            }
        }
        candidates.extend(expanded);

        for item in candidates {
            if let Some(product) = jsonld_item_to_product(&item) {
                return Some(product);
            }
        }
    }

    None
}

fn jsonld_item_to_product(item: &serde_json::Value) -> Option<JsonLdProduct> {
    let type_node = item.get("@type")?;

    // `@type` may be a plain string or an array of strings.
    let is_product = if let Some(s) = type_node.as_str() {
        s.eq_ignore_ascii_case("Product")
    } else if let Some(arr) = type_node.as_array() {
        arr.iter()
            .filter_map(serde_json::Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("Product"))
    } else {
        false
    };
    if !is_product {
        return None;
    }

    let name = item
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    let image = item.get("image").and_then(|img| {
        img.as_str().map(str::to_string).or_else(|| {
            img.as_array()?
                .iter()
                .find_map(serde_json::Value::as_str)
                .map(str::to_string)
        })
    });

    let price = item.get("offers").and_then(offers_price);

    Some(JsonLdProduct { name, image, price })
}

/// Reads `price` from an offers node, which may be a single object or an
/// array of offers, with the price itself a number or a numeric string.
fn offers_price(offers: &serde_json::Value) -> Option<f64> {
    let first = if let Some(arr) = offers.as_array() {
        arr.first()?
    } else {
        offers
    };

    let price = first.get("price")?;
    price
        .as_f64()
        .or_else(|| price.as_str().and_then(|s| s.parse::<f64>().ok()))
}
