//! Hostname-based store identification for display and catalog facets.

/// Known storefront domains, checked in order; the first substring match of
/// the hostname wins. Country-specific domains come before their generic
/// counterparts where both exist.
const STORE_DOMAINS: &[(&str, &str)] = &[
    ("amazon.com.br", "Amazon"),
    ("amazon.com", "Amazon"),
    ("shopee.com.br", "Shopee"),
    ("magazineluiza.com.br", "Magalu"),
    ("magazinevoce.com.br", "Magalu"),
    ("mercadolivre.com.br", "Mercado Livre"),
    ("americanas.com.br", "Americanas"),
    ("casasbahia.com.br", "Casas Bahia"),
    ("kabum.com.br", "KaBuM!"),
    ("aliexpress.com", "AliExpress"),
    ("terabyteshop.com.br", "Terabyte"),
    ("pichau.com.br", "Pichau"),
    ("carrefour.com.br", "Carrefour"),
    ("extra.com.br", "Extra"),
    ("pontofrio.com.br", "Ponto Frio"),
    ("submarino.com.br", "Submarino"),
    ("fastshop.com.br", "Fast Shop"),
    ("samsung.com.br", "Samsung"),
    ("apple.com.br", "Apple"),
    ("apple.com", "Apple"),
];

/// Display label used when the URL has no usable hostname.
const FALLBACK_LABEL: &str = "Loja";

/// Resolves a product URL to a canonical store display name.
///
/// Unknown hostnames fall back to the leading label of the domain
/// (`www.` stripped), capitalized: `"https://lojinha.xyz/p/1"` → `"Lojinha"`.
/// URLs that do not parse yield `"Loja"`. Total function, never fails.
#[must_use]
pub fn store_name(product_url: &str) -> String {
    let Some(hostname) = url::Url::parse(product_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return FALLBACK_LABEL.to_string();
    };

    for (domain, name) in STORE_DOMAINS {
        if hostname.contains(domain) {
            return (*name).to_string();
        }
    }

    // Unknown store: derive a label from the first domain segment.
    let leading = hostname
        .strip_prefix("www.")
        .unwrap_or(&hostname)
        .split('.')
        .next()
        .unwrap_or(FALLBACK_LABEL);

    let mut chars = leading.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => FALLBACK_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_store_by_domain() {
        assert_eq!(store_name("https://www.amazon.com.br/dp/B000123"), "Amazon");
        assert_eq!(store_name("https://shopee.com.br/produto-i.1.2"), "Shopee");
        assert_eq!(
            store_name("https://produto.mercadolivre.com.br/MLB-123"),
            "Mercado Livre"
        );
    }

    #[test]
    fn country_domain_wins_over_generic() {
        assert_eq!(store_name("https://www.amazon.com/dp/B000123"), "Amazon");
        assert_eq!(store_name("https://pt.aliexpress.com/item/1.html"), "AliExpress");
    }

    #[test]
    fn magazine_voce_maps_to_magalu() {
        assert_eq!(
            store_name("https://www.magazinevoce.com.br/magazineloja/p/123"),
            "Magalu"
        );
    }

    #[test]
    fn unknown_store_uses_capitalized_first_label() {
        assert_eq!(store_name("https://www.unknownstore.xyz/item"), "Unknownstore");
        assert_eq!(store_name("https://lojinha.com.br/p/9"), "Lojinha");
    }

    #[test]
    fn unparseable_url_falls_back_to_generic_label() {
        assert_eq!(store_name("not a url"), "Loja");
        assert_eq!(store_name(""), "Loja");
    }
}
