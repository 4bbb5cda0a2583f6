//! Bare-slug resolution ("magic URLs")
//!
//! Given only a slug, search content types in [`ContentType::REDIRECT_PRIORITY`]
//! order and stop at the first match. A slug present in two types resolves to
//! whichever comes first in that order; no collision is reported.

use tracing::debug;

use crate::content::ContentType;
use crate::source::ContentSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugResolution {
    /// Canonical path of the owning record
    Found {
        content_type: ContentType,
        path: String,
    },
    /// `/{slug}`, so the not-found page can inspect the request
    NotFound { path: String },
}

impl SlugResolution {
    pub fn is_found(&self) -> bool {
        matches!(self, SlugResolution::Found { .. })
    }

    pub fn path(&self) -> &str {
        match self {
            SlugResolution::Found { path, .. } | SlugResolution::NotFound { path } => path,
        }
    }

    /// Path with every segment percent-encoded, safe for a `Location` header
    pub fn location(&self) -> String {
        self.path()
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Resolve a bare slug to the canonical path of its record
///
/// Store failures look like misses to the caller (the source reports `None`),
/// so the worst outcome is a redirect to the not-found page.
pub async fn resolve_slug(source: &dyn ContentSource, slug: &str) -> SlugResolution {
    let slug = slug.trim_matches('/');

    if !slug.is_empty() {
        for content_type in ContentType::REDIRECT_PRIORITY {
            if let Some(record) = source.find_by_slug(content_type, slug).await {
                let path = record.canonical_path();
                debug!(slug, content_type = %content_type, path = %path, "Resolved bare slug");
                return SlugResolution::Found { content_type, path };
            }
        }
    }

    debug!(slug, source = source.name(), "Bare slug not found");
    SlugResolution::NotFound {
        path: format!("/{}", slug),
    }
}
