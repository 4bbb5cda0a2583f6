//! # Folio Common Library
//!
//! Shared code for the folio content services including:
//! - Content model (types, records, status and confidence scales)
//! - Canonical path derivation
//! - Content sources (JSON files, read-only SQLite store)
//! - Feed formatting (RSS 2.0, Atom 1.0, JSON Feed 1.1)
//! - Sitemap building and bare-slug resolution
//! - Configuration loading

pub mod canonical;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod registry;
pub mod resolve;
pub mod sitemap;
pub mod source;
mod xml;

pub use content::{ContentRecord, ContentType};
pub use error::{Error, Result};
