//! The canonical scrape result record.

use serde::{Deserialize, Serialize};

use crate::text::clean_title;

/// Product data extracted from a storefront page.
///
/// Constructed fresh per scrape call and consumed once by the bot workflow,
/// which maps it into a draft product and prompts the admin for whatever is
/// missing. Partial data with `success = true` is the expected common case,
/// not an error.
///
/// Field invariants are enforced at construction ([`ScrapedData::from_parts`]):
/// `price` is strictly positive when present, `original_price` is only kept
/// when strictly greater than `price`, the title is noise-stripped and capped,
/// and a failed record ([`ScrapedData::failure`]) carries no data fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedData {
    pub title: Option<String>,
    /// Absolute URL; strategies normalize relative candidates before
    /// constructing the record.
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Pre-discount price, always greater than `price` when present.
    pub original_price: Option<f64>,
    pub success: bool,
    /// Human-readable diagnostic, set when `success` is false.
    pub error: Option<String>,
}

impl ScrapedData {
    /// Builds a successful (possibly partial) record, normalizing each field:
    /// titles are cleaned and dropped when empty, descriptions trimmed,
    /// non-positive or non-finite prices dropped, and `original_price`
    /// dropped unless it represents a real markdown.
    #[must_use]
    pub fn from_parts(
        title: Option<String>,
        image: Option<String>,
        description: Option<String>,
        price: Option<f64>,
        original_price: Option<f64>,
    ) -> Self {
        let title = title.map(|t| clean_title(&t)).filter(|t| !t.is_empty());
        let image = image.filter(|i| !i.trim().is_empty());
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let price = price.filter(|p| p.is_finite() && *p > 0.0);
        let original_price = original_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .filter(|original| price.is_some_and(|current| *original > current));

        Self {
            title,
            image,
            description,
            price,
            original_price,
            success: true,
            error: None,
        }
    }

    /// Builds a hard-failure record: no data fields, `success = false`, and
    /// the given diagnostic.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            title: None,
            image: None,
            description: None,
            price: None,
            original_price: None,
            success: false,
            error: Some(message.into()),
        }
    }
}
