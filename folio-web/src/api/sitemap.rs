//! Sitemap endpoint

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use folio_common::sitemap;
use tracing::error;

use super::CACHE_CONTROL_ONE_HOUR;
use crate::AppState;

/// GET /sitemap.xml
///
/// Static pages plus every visible record's canonical URL.
pub async fn get_sitemap(State(state): State<AppState>) -> Response {
    let records = state.source.all_records().await;
    let entries = sitemap::build_entries(
        &state.config.site_url,
        &state.config.static_pages,
        &records,
    );

    match sitemap::render(&entries) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
                (header::CACHE_CONTROL, CACHE_CONTROL_ONE_HOUR),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Sitemap rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Sitemap rendering failed").into_response()
        }
    }
}
