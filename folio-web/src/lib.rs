//! folio-web library - feed, sitemap and magic-URL service
//!
//! Read-only HTTP surface over the content sources in `folio-common`.

use axum::Router;
use folio_common::config::SiteConfig;
use folio_common::registry::ContentLoader;
use folio_common::source::ContentSource;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Content records (read-only)
    pub source: Arc<dyn ContentSource>,
    /// Renderable bodies keyed by (type, category, slug)
    pub content: Arc<dyn ContentLoader>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        source: Arc<dyn ContentSource>,
        content: Arc<dyn ContentLoader>,
        config: SiteConfig,
    ) -> Self {
        Self {
            source,
            content,
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/feeds", get(api::feed_index))
        .route("/feeds/*segments", get(api::get_feed))
        .route("/api/magic-urls/:slug", get(api::magic_url))
        .route("/api/content/:content_type", get(api::list_content))
        .route("/api/content/:content_type/:slug", get(api::get_flat_content))
        .route(
            "/api/content/:content_type/:category/:slug",
            get(api::get_content),
        )
        .route("/sitemap.xml", get(api::get_sitemap))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
