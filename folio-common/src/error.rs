//! Common error types for folio

use thiserror::Error;

use crate::content::ContentType;

/// Common result type for folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across folio crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON content file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backing store or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// No renderable body registered for a (type, category, slug) key
    #[error("Content not found: {content_type}/{slug}")]
    ContentNotFound {
        content_type: ContentType,
        category: Option<String>,
        slug: String,
    },

    /// Document serialization failure (XML or JSON writer)
    #[error("Render error: {0}")]
    Render(String),
}
