//! Syndication feeds
//!
//! Records are projected into [`FeedItem`]s (absolute URL plus parsed
//! publish date), sorted newest first, and serialized as RSS 2.0, Atom 1.0
//! or JSON Feed 1.1. Rendering is stateless: the same record list always
//! produces the same document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::canonical::absolute_url;
use crate::config::SiteConfig;
use crate::content::{ContentRecord, ContentType};
use crate::Result;

mod atom;
mod json_feed;
mod rss;

// ========================================
// Formats and requests
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Rss,
    Atom,
    Json,
}

impl FeedFormat {
    pub const ALL: [FeedFormat; 3] = [FeedFormat::Rss, FeedFormat::Atom, FeedFormat::Json];

    /// File name of the format in feed routes
    pub fn file_name(&self) -> &'static str {
        match self {
            FeedFormat::Rss => "rss.xml",
            FeedFormat::Atom => "atom.xml",
            FeedFormat::Json => "feed.json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            FeedFormat::Rss => "application/rss+xml; charset=utf-8",
            FeedFormat::Atom => "application/atom+xml; charset=utf-8",
            FeedFormat::Json => "application/feed+json; charset=utf-8",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }
}

/// Feed route rejected by [`FeedRequest::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedRequestError {
    #[error("Unknown content type: {0}")]
    UnknownType(String),

    #[error("Unknown feed format: {0}")]
    UnknownFormat(String),

    #[error("Malformed feed path: {0}")]
    Malformed(String),
}

/// A parsed feed route: which format, and optionally which content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRequest {
    pub format: FeedFormat,
    /// `None` is the aggregate feed across every type
    pub scope: Option<ContentType>,
}

impl FeedRequest {
    /// Parse the segments after `/feeds/`
    ///
    /// ```
    /// use folio_common::feed::{FeedFormat, FeedRequest};
    /// use folio_common::ContentType;
    ///
    /// let req = FeedRequest::parse("essays/atom.xml").unwrap();
    /// assert_eq!(req.format, FeedFormat::Atom);
    /// assert_eq!(req.scope, Some(ContentType::Essays));
    ///
    /// let req = FeedRequest::parse("notes.json").unwrap();
    /// assert_eq!(req.format, FeedFormat::Json);
    /// assert!(FeedRequest::parse("bogus.xml").is_err());
    /// ```
    pub fn parse(segments: &str) -> std::result::Result<Self, FeedRequestError> {
        let trimmed = segments.trim_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();

        match parts.as_slice() {
            [file] => {
                if let Some(format) = FeedFormat::from_file_name(file) {
                    return Ok(FeedRequest { format, scope: None });
                }

                // Shorthand: {type}.xml (RSS) or {type}.json (JSON Feed)
                let (stem, extension) = file
                    .rsplit_once('.')
                    .ok_or_else(|| FeedRequestError::Malformed(trimmed.to_string()))?;
                let format = match extension {
                    "xml" => FeedFormat::Rss,
                    "json" => FeedFormat::Json,
                    other => return Err(FeedRequestError::UnknownFormat(other.to_string())),
                };
                let scope = ContentType::parse(stem)
                    .ok_or_else(|| FeedRequestError::UnknownType(stem.to_string()))?;
                Ok(FeedRequest {
                    format,
                    scope: Some(scope),
                })
            }
            [type_name, file] => {
                let scope = ContentType::parse(type_name)
                    .ok_or_else(|| FeedRequestError::UnknownType(type_name.to_string()))?;
                let format = FeedFormat::from_file_name(file)
                    .ok_or_else(|| FeedRequestError::UnknownFormat(file.to_string()))?;
                Ok(FeedRequest {
                    format,
                    scope: Some(scope),
                })
            }
            _ => Err(FeedRequestError::Malformed(trimmed.to_string())),
        }
    }

    /// Route path of this feed, e.g. `/feeds/essays/rss.xml`
    pub fn path(&self) -> String {
        match self.scope {
            Some(ty) => format!("/feeds/{}/{}", ty, self.format.file_name()),
            None => format!("/feeds/{}", self.format.file_name()),
        }
    }
}

/// Valid routes, formats and types, returned with rejected feed requests
#[derive(Debug, Clone, Serialize)]
pub struct FeedDiscovery {
    pub routes: Vec<String>,
    pub formats: Vec<&'static str>,
    pub types: Vec<&'static str>,
}

pub fn discovery() -> FeedDiscovery {
    let mut routes: Vec<String> = FeedFormat::ALL
        .iter()
        .map(|f| format!("/feeds/{}", f.file_name()))
        .collect();
    routes.extend(
        FeedFormat::ALL
            .iter()
            .map(|f| format!("/feeds/{{type}}/{}", f.file_name())),
    );
    routes.push("/feeds/{type}.xml".to_string());
    routes.push("/feeds/{type}.json".to_string());

    FeedDiscovery {
        routes,
        formats: FeedFormat::ALL.iter().map(FeedFormat::file_name).collect(),
        types: ContentType::names(),
    }
}

// ========================================
// Feed metadata and items
// ========================================

/// Channel-level metadata shared by all three formats
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMeta {
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub author: String,
    pub language: String,
    /// Absolute URL of the feed document itself
    pub self_url: String,
}

impl FeedMeta {
    pub fn for_request(config: &SiteConfig, request: &FeedRequest) -> Self {
        let title = match request.scope {
            Some(ty) => format!("{}: {}", config.title, ty),
            None => config.title.clone(),
        };

        Self {
            title,
            description: config.description.clone(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            author: config.author.clone(),
            language: config.language.clone(),
            self_url: absolute_url(&config.site_url, &request.path()),
        }
    }
}

/// Serialization-only projection of a [`ContentRecord`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// Absolute canonical URL; also the item id
    pub url: String,
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
    pub tags: Vec<String>,
    pub content_type: ContentType,
}

impl FeedItem {
    pub fn from_record(record: &ContentRecord, site_url: &str) -> Self {
        Self {
            title: record.title.clone(),
            url: absolute_url(site_url, &record.canonical_path()),
            published: record.effective_date(),
            summary: record.preview.clone(),
            tags: record.tags.clone(),
            content_type: record.content_type,
        }
    }
}

/// Sort newest first by effective date; undated records go last
///
/// The sort is stable, so records with equal dates keep source order.
pub fn sort_by_effective_date(records: &mut [ContentRecord]) {
    records.sort_by_cached_key(|r| {
        let date = r.effective_date();
        (date.is_none(), std::cmp::Reverse(date))
    });
}

pub fn build_items(
    mut records: Vec<ContentRecord>,
    site_url: &str,
    limit: Option<usize>,
) -> Vec<FeedItem> {
    sort_by_effective_date(&mut records);
    let limit = limit.unwrap_or(records.len());
    records
        .iter()
        .filter(|r| !r.is_hidden())
        .take(limit)
        .map(|r| FeedItem::from_record(r, site_url))
        .collect()
}

/// Newest item date, used as the channel/feed update time
pub(crate) fn latest(items: &[FeedItem]) -> Option<DateTime<Utc>> {
    items.iter().filter_map(|i| i.published).max()
}

pub fn render(format: FeedFormat, meta: &FeedMeta, items: &[FeedItem]) -> Result<String> {
    match format {
        FeedFormat::Rss => rss::render(meta, items),
        FeedFormat::Atom => atom::render(meta, items),
        FeedFormat::Json => json_feed::render(meta, items),
    }
}
