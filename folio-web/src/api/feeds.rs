//! Syndication feed endpoints
//!
//! `GET /feeds/{segments}` serves RSS 2.0, Atom 1.0 or JSON Feed 1.1, either
//! for every content type or scoped to one. A route that does not parse is a
//! client error answered with the list of valid routes; it never reaches the
//! content source.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use folio_common::feed::{self, FeedDiscovery, FeedMeta, FeedRequest, FeedRequestError};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use super::CACHE_CONTROL_ONE_HOUR;
use crate::AppState;

/// GET /feeds
///
/// Lists valid feed routes, formats and content types.
pub async fn feed_index() -> Json<FeedDiscovery> {
    Json(feed::discovery())
}

/// GET /feeds/*segments
pub async fn get_feed(
    State(state): State<AppState>,
    Path(segments): Path<String>,
) -> Result<Response, FeedError> {
    let request = FeedRequest::parse(&segments)?;

    let records = match request.scope {
        Some(content_type) => state.source.records(content_type).await,
        None => state.source.all_records().await,
    };

    let meta = FeedMeta::for_request(&state.config, &request);
    let items = feed::build_items(records, &state.config.site_url, state.config.feed_item_limit);
    debug!(route = %request.path(), items = items.len(), "Rendering feed");

    let body = feed::render(request.format, &meta, &items)
        .map_err(|e| FeedError::Render(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, request.format.content_type()),
            (header::CACHE_CONTROL, CACHE_CONTROL_ONE_HOUR),
        ],
        body,
    )
        .into_response())
}

/// Feed API errors
#[derive(Debug)]
pub enum FeedError {
    InvalidRequest(FeedRequestError),
    Render(String),
}

impl From<FeedRequestError> for FeedError {
    fn from(e: FeedRequestError) -> Self {
        FeedError::InvalidRequest(e)
    }
}

/// 400 body: the rejection plus everything needed to build a valid route
#[derive(Debug, Serialize)]
struct InvalidFeedBody {
    error: String,
    #[serde(flatten)]
    discovery: FeedDiscovery,
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        match self {
            FeedError::InvalidRequest(e) => {
                debug!(error = %e, "Rejected feed request");
                let body = InvalidFeedBody {
                    error: e.to_string(),
                    discovery: feed::discovery(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            FeedError::Render(msg) => {
                error!("Feed rendering failed: {}", msg);
                let body = Json(json!({
                    "error": format!("Feed rendering failed: {}", msg),
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
