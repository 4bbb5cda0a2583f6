//! Content listing and body lookup
//!
//! Lists the visible records of a type and serves the raw MDX/Markdown body
//! registered for a canonical path.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use folio_common::{ContentRecord, ContentType, Error};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::AppState;

/// One row of a type listing
#[derive(Debug, Serialize)]
pub struct ContentSummary {
    pub title: String,
    pub slug: String,
    pub path: String,
    pub start_date: String,
    pub preview: String,
}

impl From<ContentRecord> for ContentSummary {
    fn from(record: ContentRecord) -> Self {
        Self {
            path: record.canonical_path(),
            title: record.title,
            slug: record.slug,
            start_date: record.start_date,
            preview: record.preview,
        }
    }
}

/// GET /api/content/:content_type
///
/// Unknown type names answer with an empty listing, not an error.
pub async fn list_content(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> Json<Vec<ContentSummary>> {
    let records = state.source.records_named(&content_type).await;
    Json(records.into_iter().map(ContentSummary::from).collect())
}

/// GET /api/content/:content_type/:category/:slug
pub async fn get_content(
    State(state): State<AppState>,
    Path((content_type, category, slug)): Path<(String, String, String)>,
) -> Result<Response, ContentError> {
    load(&state, &content_type, Some(&category), &slug).await
}

/// GET /api/content/:content_type/:slug
pub async fn get_flat_content(
    State(state): State<AppState>,
    Path((content_type, slug)): Path<(String, String)>,
) -> Result<Response, ContentError> {
    load(&state, &content_type, None, &slug).await
}

async fn load(
    state: &AppState,
    content_type: &str,
    category: Option<&str>,
    slug: &str,
) -> Result<Response, ContentError> {
    let content_type = ContentType::parse(content_type)
        .ok_or_else(|| ContentError::NotFound(format!("Unknown content type: {}", content_type)))?;

    match state.content.load(content_type, category, slug).await {
        Ok(content) => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            content.body,
        )
            .into_response()),
        Err(e @ Error::ContentNotFound { .. }) => Err(ContentError::NotFound(e.to_string())),
        Err(e) => Err(ContentError::Unavailable(e.to_string())),
    }
}

/// Content API errors
#[derive(Debug)]
pub enum ContentError {
    NotFound(String),
    Unavailable(String),
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ContentError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ContentError::Unavailable(msg) => {
                error!("Content body unavailable: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Content unavailable: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
