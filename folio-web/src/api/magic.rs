//! Magic URL endpoint
//!
//! `GET /api/magic-urls/:slug` answers with a temporary redirect (307, method
//! preserved) to the canonical page of whichever record owns the slug, or to
//! `/{slug}` so the not-found page can take over.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::info;

use crate::AppState;
use folio_common::resolve::resolve_slug;

/// GET /api/magic-urls/:slug
pub async fn magic_url(State(state): State<AppState>, Path(slug): Path<String>) -> Redirect {
    let resolution = resolve_slug(state.source.as_ref(), &slug).await;
    info!(
        slug = %slug,
        found = resolution.is_found(),
        location = %resolution.path(),
        "Magic URL resolved"
    );
    Redirect::temporary(&resolution.location())
}
