//! Title cleanup for scraped product names.

use regex::Regex;

/// Display titles longer than this are cut; protects downstream storage and
/// the catalog cards.
const MAX_TITLE_CHARS: usize = 200;

/// Strips storefront noise from a scraped title.
///
/// Removes everything from the first `|` (storefront suffixes like
/// `"| Amazon.com.br"`), trailing `- <store>` annotations, trailing review
/// counts (`"(123 avaliações)"`), collapses whitespace runs, and truncates to
/// 200 characters on a char boundary. Total and deterministic.
#[must_use]
pub fn clean_title(title: &str) -> String {
    let without_pipe = match title.find('|') {
        Some(pos) => &title[..pos],
        None => title,
    };

    let store_suffix =
        Regex::new(r"(?i)\s*-\s*(Amazon|Shopee|Mercado Livre|Magazine Luiza).*$")
            .expect("valid regex");
    let without_store = store_suffix.replace(without_pipe, "");

    let review_suffix =
        Regex::new(r"(?i)\s*\(\d+\s*avalia[çc][õo]es?\).*$").expect("valid regex");
    let without_reviews = review_suffix.replace(&without_store, "");

    let collapsed = without_reviews.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed.chars().take(MAX_TITLE_CHARS).collect()
}
