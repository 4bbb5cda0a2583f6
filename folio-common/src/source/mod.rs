//! Content source adapters
//!
//! A [`ContentSource`] yields the visible records of one content type. Read
//! failures never escape an adapter: a missing or malformed backing file is
//! logged and served as an empty listing so one broken source cannot take
//! down rendering of unrelated content.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{SourceConfig, SourceKind};
use crate::content::{ContentRecord, ContentType, RawRecord};

mod json;
mod sqlite;

pub use json::JsonSource;
pub use sqlite::SqliteSource;

/// Read-only access to content records of every type
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Backend identifier for logs ("json", "sqlite")
    fn name(&self) -> &'static str;

    /// Visible records of one type in the source's natural order
    async fn records(&self, content_type: ContentType) -> Vec<ContentRecord>;

    /// First visible record of a type whose slug matches exactly
    async fn find_by_slug(&self, content_type: ContentType, slug: &str) -> Option<ContentRecord> {
        self.records(content_type)
            .await
            .into_iter()
            .find(|record| record.slug == slug)
    }

    /// Records for a type given by name; unknown names yield an empty listing
    async fn records_named(&self, name: &str) -> Vec<ContentRecord> {
        match ContentType::parse(name) {
            Some(content_type) => self.records(content_type).await,
            None => {
                debug!(content_type = name, "Unknown content type requested");
                Vec::new()
            }
        }
    }

    /// Visible records of every type, grouped in [`ContentType::ALL`] order
    async fn all_records(&self) -> Vec<ContentRecord> {
        let mut all = Vec::new();
        for content_type in ContentType::ALL {
            all.extend(self.records(content_type).await);
        }
        all
    }
}

/// Build the configured source
pub fn open_source(config: &SourceConfig) -> Arc<dyn ContentSource> {
    match config.kind {
        SourceKind::Sqlite => Arc::new(SqliteSource::new(&config.path)),
        SourceKind::Json => Arc::new(JsonSource::new(&config.path)),
    }
}

/// Normalize raw rows, dropping hidden records and rows without a slug
pub(crate) fn visible_records(
    content_type: ContentType,
    raw: impl IntoIterator<Item = RawRecord>,
) -> Vec<ContentRecord> {
    raw.into_iter()
        .filter_map(|row| {
            let record = row.into_record(content_type);
            if record.is_none() {
                warn!(content_type = %content_type, "Skipping content row without slug");
            }
            record
        })
        .filter(|record| !record.is_hidden())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<ContentRecord>);

    #[async_trait]
    impl ContentSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn records(&self, content_type: ContentType) -> Vec<ContentRecord> {
            self.0
                .iter()
                .filter(|r| r.content_type == content_type)
                .cloned()
                .collect()
        }
    }

    fn row(slug: &str, state: Option<&str>) -> RawRecord {
        RawRecord {
            slug: Some(slug.to_string()),
            state: state.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_visible_records_excludes_hidden() {
        let records = visible_records(
            ContentType::Notes,
            vec![
                row("a", None),
                row("b", Some("hidden")),
                row("c", Some("active")),
                RawRecord::default(),
            ],
        );
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_records_named_unknown_type_is_empty() {
        let source = FixedSource(visible_records(ContentType::Blog, vec![row("x", None)]));
        assert!(source.records_named("bogus").await.is_empty());
        assert_eq!(source.records_named("blog").await.len(), 1);
    }

    #[tokio::test]
    async fn test_default_find_by_slug() {
        let source = FixedSource(visible_records(
            ContentType::Blog,
            vec![row("first", None), row("second", None)],
        ));
        let found = source.find_by_slug(ContentType::Blog, "second").await;
        assert_eq!(found.map(|r| r.slug), Some("second".to_string()));
        assert!(source.find_by_slug(ContentType::Essays, "second").await.is_none());
    }
}
