//! Message composition for group broadcasts.
//!
//! Only the text is built here; delivery (chat API calls, group bookkeeping,
//! rate limiting) is owned by the bot layer, which consumes these strings.

use crate::money::format_price;
use crate::{BlogPost, Product};

/// Emoji shown before a product title, by catalog category.
const CATEGORY_EMOJI: &[(&str, &str)] = &[
    ("Eletronicos", "📱"),
    ("Moda", "👗"),
    ("Casa", "🏠"),
    ("Beleza", "💄"),
    ("Games", "🎮"),
    ("Esportes", "⚽"),
    ("Livros", "📚"),
    ("Brinquedos", "🧸"),
    ("Pet", "🐾"),
    ("Alimentos", "🍔"),
];

const DEFAULT_EMOJI: &str = "🩷";

fn category_emoji(category: Option<&str>) -> &'static str {
    let Some(category) = category else {
        return DEFAULT_EMOJI;
    };
    CATEGORY_EMOJI
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(DEFAULT_EMOJI, |(_, emoji)| emoji)
}

/// Builds the broadcast text announcing a published deal.
///
/// The "De:" strikethrough line appears only when the product carries a real
/// discount (`original_price > price`).
#[must_use]
pub fn build_product_message(product: &Product, site_url: &str) -> String {
    let emoji = category_emoji(product.category.as_deref());
    let mut message = format!("{emoji} {}\n\n", product.title);

    if let Some(original) = product.original_price {
        if original > product.price {
            message.push_str(&format!("De: R$ {}\n", format_price(original)));
        }
    }

    message.push_str(&format!("🔥 Por: R$ {}\n\n", format_price(product.price)));
    message.push_str(&format!("🛍 {site_url}/oferta/{}\n", product.id));
    message.push_str(&format!("Vendido por: {}", product.store_name));

    message
}

/// Builds the broadcast text announcing a new blog post.
#[must_use]
pub fn build_blog_message(post: &BlogPost, site_url: &str) -> String {
    format!(
        "📝 *Novo post no blog!*\n\n*{}*\n\n📖 Leia: {site_url}/blog/{}",
        post.title, post.slug
    )
}
