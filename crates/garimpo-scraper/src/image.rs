//! Image URL resolution against the scraped page.

/// Resolves an image candidate to an absolute URL.
///
/// Already-absolute URLs pass through unchanged; protocol-relative ones get
/// `https:`; root-relative paths join the base URL's origin; anything else is
/// joined with a single `/`. When `base_url` does not parse, the candidate is
/// returned unchanged — a questionable image beats a lost one, and the admin
/// reviews every field anyway.
#[must_use]
pub fn normalize_image_url(image_url: &str, base_url: &str) -> String {
    if image_url.starts_with("http://") || image_url.starts_with("https://") {
        return image_url.to_string();
    }

    if image_url.starts_with("//") {
        return format!("https:{image_url}");
    }

    let Ok(base) = url::Url::parse(base_url) else {
        return image_url.to_string();
    };
    let origin = base.origin().ascii_serialization();

    if image_url.starts_with('/') {
        format!("{origin}{image_url}")
    } else {
        format!("{origin}/{image_url}")
    }
}
