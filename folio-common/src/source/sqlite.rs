//! Read-only SQLite content source
//!
//! One table per content type, named after the type identifier. Each call
//! opens its own read-only connection and closes it before returning, so no
//! handle outlives the request that needed it.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{visible_records, ContentSource};
use crate::content::{ContentRecord, ContentType, RawRecord};
use crate::{Error, Result};

pub struct SqliteSource {
    db_path: PathBuf,
}

impl SqliteSource {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open a read-only connection
    ///
    /// `immutable` tells SQLite the file cannot change underneath us, so it
    /// skips locking entirely.
    async fn connect(&self) -> Result<SqliteConnection> {
        if !self.db_path.exists() {
            return Err(Error::NotFound(format!(
                "Database not found: {}",
                self.db_path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .read_only(true)
            .immutable(true);

        Ok(options.connect().await?)
    }

    async fn query_rows(
        &self,
        content_type: ContentType,
        slug: Option<&str>,
    ) -> Result<Vec<RawRecord>> {
        let mut conn = self.connect().await?;

        // Table names come from the closed ContentType set, never from input
        let result = match slug {
            Some(slug) => {
                let sql = format!("SELECT * FROM {} WHERE slug = ?", content_type);
                sqlx::query(&sql).bind(slug).fetch_all(&mut conn).await
            }
            None => {
                let sql = format!("SELECT * FROM {} ORDER BY start_date DESC", content_type);
                sqlx::query(&sql).fetch_all(&mut conn).await
            }
        };

        if let Err(e) = conn.close().await {
            debug!(error = %e, "Error closing read-only connection");
        }

        Ok(result?.iter().map(raw_from_row).collect())
    }
}

#[async_trait]
impl ContentSource for SqliteSource {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn records(&self, content_type: ContentType) -> Vec<ContentRecord> {
        match self.query_rows(content_type, None).await {
            Ok(rows) => visible_records(content_type, rows),
            Err(e) => {
                warn!(
                    content_type = %content_type,
                    db = %self.db_path.display(),
                    error = %e,
                    "Content table unavailable, serving empty listing"
                );
                Vec::new()
            }
        }
    }

    async fn find_by_slug(&self, content_type: ContentType, slug: &str) -> Option<ContentRecord> {
        match self.query_rows(content_type, Some(slug)).await {
            Ok(rows) => visible_records(content_type, rows).into_iter().next(),
            Err(e) => {
                debug!(content_type = %content_type, error = %e, "Slug lookup failed");
                None
            }
        }
    }
}

/// Text column by name; absent columns and NULL both read as `None`
fn text(row: &SqliteRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column).ok().flatten()
}

fn integer(row: &SqliteRow, column: &str) -> Option<i64> {
    row.try_get::<Option<i64>, _>(column)
        .ok()
        .flatten()
        .or_else(|| text(row, column).and_then(|v| v.trim().parse().ok()))
}

/// Tags are stored either as a JSON array or as a comma separated list
fn parse_tags(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.starts_with('[') {
        if let Ok(tags) = serde_json::from_str::<Vec<String>>(value) {
            return tags;
        }
    }
    value
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn raw_from_row(row: &SqliteRow) -> RawRecord {
    RawRecord {
        title: text(row, "title"),
        slug: text(row, "slug"),
        category: text(row, "category"),
        verse_type: text(row, "verse_type"),
        category_slug: text(row, "category_slug"),
        start_date: text(row, "start_date"),
        end_date: text(row, "end_date"),
        updated_at: text(row, "updated_at"),
        tags: text(row, "tags").map(|t| parse_tags(&t)),
        status: text(row, "status"),
        confidence: text(row, "confidence"),
        importance: integer(row, "importance"),
        preview: text(row, "preview").or_else(|| text(row, "description")),
        state: text(row, "state"),
    }
}
