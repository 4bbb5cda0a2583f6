//! Canonical URL paths for content records

use crate::content::{ContentRecord, ContentType};

/// Category segment used when a categorized record has no category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Lower-case a string and collapse each run of whitespace into one `-`
///
/// ```
/// use folio_common::canonical::slugify;
///
/// assert_eq!(slugify("Philosophy of  Mind"), "philosophy-of-mind");
/// assert_eq!(slugify("  Ethics "), "ethics");
/// ```
pub fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn category_segment(category: Option<&str>) -> String {
    match category.map(slugify) {
        Some(segment) if !segment.is_empty() => segment,
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Compute the canonical path for a (type, category, slug) triple
///
/// Categorized types produce `/{type}/{category}/{slug}`, flat types
/// `/{type}/{slug}`. A missing or blank category becomes `uncategorized`.
pub fn canonical_path(content_type: ContentType, category: Option<&str>, slug: &str) -> String {
    if content_type.has_category() {
        format!("/{}/{}/{}", content_type, category_segment(category), slug)
    } else {
        format!("/{}/{}", content_type, slug)
    }
}

/// Join the site origin and a canonical path
pub fn absolute_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), path)
}

impl ContentRecord {
    /// Canonical path, preferring the stored category slug over the category name
    pub fn canonical_path(&self) -> String {
        let category = self
            .category_slug
            .as_deref()
            .or(self.category.as_deref());
        canonical_path(self.content_type, category, &self.slug)
    }
}
