pub mod broadcast;
pub mod money;
pub mod store;
pub mod timeago;

use serde::{Deserialize, Serialize};

pub use money::{calculate_discount, format_price};
pub use store::store_name;
pub use timeago::time_elapsed;

/// A published deal as persisted by the catalog.
///
/// The scraping engine never constructs this directly: the bot layer maps a
/// scrape result into a draft, lets the admin fill gaps, and publishes the
/// confirmed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    /// Pre-discount price. `None` when the deal has no strikethrough price.
    pub original_price: Option<f64>,
    /// Display name from [`store::store_name`].
    pub store_name: String,
    pub category: Option<String>,
}

/// An editorial blog post, referenced by broadcast messages only through its
/// title and slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
}
