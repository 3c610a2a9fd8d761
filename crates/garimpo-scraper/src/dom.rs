//! Thin helpers over `scraper` for selector-driven extraction.
//!
//! Strategies express their fallback chains as ordered [`Rule`] slices
//! rather than nested if-chains, so the priority order is data a test can
//! pin down. All selectors in this crate are static literals; a malformed
//! one is a programming error, hence the `expect`s.

use scraper::{Html, Selector};

/// One extraction step: read an element's text, or one of its attributes.
pub(crate) enum Rule {
    /// Inner text of the first element matching the selector.
    Text(&'static str),
    /// An attribute of the first element matching the selector.
    Attr(&'static str, &'static str),
}

/// Applies `rules` in order and returns the first non-empty trimmed result.
pub(crate) fn first_match(doc: &Html, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| match rule {
        Rule::Text(selector) => select_text(doc, selector),
        Rule::Attr(selector, attr) => select_attr(doc, selector, attr),
    })
}

/// Trimmed inner text of the first element matching `selector`, if non-empty.
pub(crate) fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = doc.select(&selector).next()?;
    let text: String = element.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Trimmed value of `attr` on the first element matching `selector`.
pub(crate) fn select_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let value = doc.select(&selector).next()?.value().attr(attr)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `content` attribute of the first element matching `selector` — the shape
/// of every `<meta>` lookup.
pub(crate) fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    select_attr(doc, selector, "content")
}

/// Price-bearing text of the first element matching `selector`: inner text,
/// then the `content` attribute, then `data-price`, first non-empty wins.
pub(crate) fn price_text(doc: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).expect("valid selector");
    let element = doc.select(&parsed).next()?;

    let text: String = element.text().collect();
    let text = text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }

    for attr in ["content", "data-price"] {
        if let Some(value) = element.value().attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}
