//! Liveness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Service identity plus the content backend it is reading from
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Content source backend ("sqlite" or "json")
    pub source: &'static str,
    pub site_url: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "folio-web",
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.name(),
        site_url: state.config.site_url.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
