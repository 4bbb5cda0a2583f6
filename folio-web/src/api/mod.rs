//! HTTP API handlers for folio-web

pub mod content;
pub mod feeds;
pub mod health;
pub mod magic;
pub mod sitemap;

pub use content::{get_content, get_flat_content, list_content};
pub use feeds::{feed_index, get_feed};
pub use health::health_routes;
pub use magic::magic_url;
pub use sitemap::get_sitemap;

/// Feeds and sitemaps change rarely; let clients and proxies keep them an hour
pub const CACHE_CONTROL_ONE_HOUR: &str = "public, max-age=3600";
