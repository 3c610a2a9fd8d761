pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod price;
pub mod stores;
pub mod text;
pub mod types;

mod dom;
mod fetch;
mod jsonld;

pub use client::Scraper;
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use stores::Storefront;
pub use types::ScrapedData;
