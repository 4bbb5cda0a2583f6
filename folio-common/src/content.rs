//! Content model
//!
//! Every syndicated item (post, essay, paper, note, ...) is normalized into a
//! [`ContentRecord`] regardless of whether it was read from a JSON file or a
//! SQLite row. Raw rows arrive as [`RawRecord`] and pass through
//! [`RawRecord::into_record`], which is the only place field-level leniency
//! (status spellings, blank strings, verse types) is handled.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ========================================
// Content Types
// ========================================

/// Fixed set of content types served by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Essays,
    Papers,
    Notes,
    Fiction,
    Verse,
    Reviews,
    News,
    Ocs,
    Progymnasmata,
    Diary,
}

impl ContentType {
    /// All content types in listing order
    pub const ALL: [ContentType; 11] = [
        ContentType::Blog,
        ContentType::Essays,
        ContentType::Papers,
        ContentType::Notes,
        ContentType::Fiction,
        ContentType::Verse,
        ContentType::Reviews,
        ContentType::News,
        ContentType::Ocs,
        ContentType::Progymnasmata,
        ContentType::Diary,
    ];

    /// Search order used when resolving a bare slug; first hit wins
    pub const REDIRECT_PRIORITY: [ContentType; 10] = [
        ContentType::Blog,
        ContentType::Essays,
        ContentType::Fiction,
        ContentType::News,
        ContentType::Notes,
        ContentType::Ocs,
        ContentType::Papers,
        ContentType::Progymnasmata,
        ContentType::Reviews,
        ContentType::Verse,
    ];

    /// Identifier used in URLs, file stems and table names
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Essays => "essays",
            ContentType::Papers => "papers",
            ContentType::Notes => "notes",
            ContentType::Fiction => "fiction",
            ContentType::Verse => "verse",
            ContentType::Reviews => "reviews",
            ContentType::News => "news",
            ContentType::Ocs => "ocs",
            ContentType::Progymnasmata => "progymnasmata",
            ContentType::Diary => "diary",
        }
    }

    /// Parse a content type identifier; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }

    /// Whether canonical paths carry a category segment
    pub fn has_category(&self) -> bool {
        !matches!(self, ContentType::Diary)
    }

    /// Column holding the category dimension in the relational store
    pub fn category_column(&self) -> &'static str {
        match self {
            ContentType::Verse => "verse_type",
            _ => "category",
        }
    }

    /// Sitemap priority weight
    pub fn sitemap_priority(&self) -> f32 {
        match self {
            ContentType::Essays => 0.9,
            ContentType::Blog | ContentType::Papers => 0.8,
            ContentType::Fiction | ContentType::Verse | ContentType::Reviews => 0.7,
            ContentType::Notes | ContentType::News => 0.6,
            ContentType::Ocs | ContentType::Progymnasmata => 0.5,
            ContentType::Diary => 0.4,
        }
    }

    /// Every identifier, for discovery payloads
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(ContentType::as_str).collect()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Status / Confidence / State
// ========================================

/// Lower-case and fold `-`/`_` to spaces so "In Progress", "in-progress"
/// and "in_progress" compare equal
fn fold(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(|c: char| c == '-' || c == '_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Publication status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Abandoned,
    Notes,
    Draft,
    #[serde(rename = "In Progress")]
    InProgress,
    Finished,
    Active,
    Published,
    Archived,
}

impl Status {
    pub fn parse(value: &str) -> Option<Self> {
        match fold(value).as_str() {
            "abandoned" => Some(Status::Abandoned),
            "notes" => Some(Status::Notes),
            "draft" => Some(Status::Draft),
            "in progress" => Some(Status::InProgress),
            "finished" => Some(Status::Finished),
            "active" => Some(Status::Active),
            "published" => Some(Status::Published),
            "archived" => Some(Status::Archived),
            _ => None,
        }
    }
}

/// Epistemic confidence, ordered from "impossible" to "certain"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Impossible,
    Remote,
    #[serde(rename = "highly unlikely")]
    HighlyUnlikely,
    Unlikely,
    Possible,
    Likely,
    #[serde(rename = "highly likely")]
    HighlyLikely,
    Certain,
}

impl Confidence {
    pub fn parse(value: &str) -> Option<Self> {
        match fold(value).as_str() {
            "impossible" => Some(Confidence::Impossible),
            "remote" => Some(Confidence::Remote),
            "highly unlikely" => Some(Confidence::HighlyUnlikely),
            "unlikely" => Some(Confidence::Unlikely),
            "possible" => Some(Confidence::Possible),
            "likely" => Some(Confidence::Likely),
            "highly likely" => Some(Confidence::HighlyLikely),
            "certain" => Some(Confidence::Certain),
            _ => None,
        }
    }
}

/// Visibility of a record in public listings
///
/// Only an explicit `hidden` hides a record. A missing state is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentState {
    #[default]
    Active,
    Hidden,
}

impl ContentState {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("hidden") => ContentState::Hidden,
            _ => ContentState::Active,
        }
    }
}

// ========================================
// Dates
// ========================================

/// Parse the date formats found in content files and store rows
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`
/// (interpreted as UTC). Blank or unrecognized input yields `None`.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ========================================
// Records
// ========================================

/// A single syndicated content item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub content_type: ContentType,
    pub title: String,
    pub slug: String,
    /// Category (or verse type for verse); `None` for flat records
    pub category: Option<String>,
    /// Explicit URL segment for the category, overriding slugification
    pub category_slug: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub updated_at: Option<String>,
    pub tags: Vec<String>,
    pub status: Option<Status>,
    pub confidence: Option<Confidence>,
    /// 0..=10
    pub importance: Option<u8>,
    pub preview: String,
    pub state: ContentState,
}

impl ContentRecord {
    pub fn is_hidden(&self) -> bool {
        self.state == ContentState::Hidden
    }

    /// Date the item is ordered by: `end_date` when set, else `start_date`
    ///
    /// A set but unparsable `end_date` yields `None`; it never falls back
    /// to `start_date`.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        match self.end_date.as_deref() {
            Some(end) => parse_date(end),
            None => parse_date(&self.start_date),
        }
    }

    /// Last modification for sitemaps: `updated_at` when set, else `start_date`
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at
            .as_deref()
            .and_then(parse_date)
            .or_else(|| parse_date(&self.start_date))
    }
}

/// Untyped record as stored in JSON files or SQLite rows
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub verse_type: Option<String>,
    pub category_slug: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub updated_at: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub confidence: Option<String>,
    pub importance: Option<i64>,
    #[serde(alias = "description")]
    pub preview: Option<String>,
    pub state: Option<String>,
}

impl RawRecord {
    /// Normalize into a [`ContentRecord`]; records without a slug are dropped
    pub fn into_record(self, content_type: ContentType) -> Option<ContentRecord> {
        let slug = non_blank(self.slug)?;

        let category = if content_type == ContentType::Verse {
            non_blank(self.verse_type).or_else(|| non_blank(self.category))
        } else {
            non_blank(self.category)
        };

        Some(ContentRecord {
            content_type,
            title: non_blank(self.title).unwrap_or_else(|| slug.clone()),
            slug,
            category,
            category_slug: non_blank(self.category_slug),
            start_date: self.start_date.unwrap_or_default().trim().to_string(),
            end_date: non_blank(self.end_date),
            updated_at: non_blank(self.updated_at),
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            status: self.status.as_deref().and_then(Status::parse),
            confidence: self.confidence.as_deref().and_then(Confidence::parse),
            importance: self.importance.map(|i| i.clamp(0, 10) as u8),
            preview: self.preview.unwrap_or_default().trim().to_string(),
            state: ContentState::parse(self.state.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn raw(slug: &str) -> RawRecord {
        RawRecord {
            slug: Some(slug.to_string()),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_content_type_parse_roundtrip() {
        for ty in ContentType::ALL {
            assert_eq!(ContentType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(ContentType::parse("bogus"), None);
        assert_eq!(ContentType::parse("Blog"), None);
    }

    #[test]
    fn test_only_diary_is_flat() {
        let flat: Vec<_> = ContentType::ALL
            .into_iter()
            .filter(|ty| !ty.has_category())
            .collect();
        assert_eq!(flat, vec![ContentType::Diary]);
    }

    #[test]
    fn test_redirect_priority_excludes_diary() {
        assert!(!ContentType::REDIRECT_PRIORITY.contains(&ContentType::Diary));
        assert_eq!(ContentType::REDIRECT_PRIORITY[0], ContentType::Blog);
    }

    #[test]
    fn test_status_parse_lenient() {
        assert_eq!(Status::parse("In Progress"), Some(Status::InProgress));
        assert_eq!(Status::parse("in-progress"), Some(Status::InProgress));
        assert_eq!(Status::parse("IN_PROGRESS"), Some(Status::InProgress));
        assert_eq!(Status::parse("published"), Some(Status::Published));
        assert_eq!(Status::parse("someday"), None);
    }

    #[test]
    fn test_confidence_is_ordered() {
        assert!(Confidence::Impossible < Confidence::Remote);
        assert!(Confidence::Likely < Confidence::HighlyLikely);
        assert!(Confidence::HighlyLikely < Confidence::Certain);
        assert_eq!(
            Confidence::parse("Highly Unlikely"),
            Some(Confidence::HighlyUnlikely)
        );
    }

    #[test]
    fn test_state_only_explicit_hidden_hides() {
        assert_eq!(ContentState::parse(Some("hidden")), ContentState::Hidden);
        assert_eq!(ContentState::parse(Some(" Hidden ")), ContentState::Hidden);
        assert_eq!(ContentState::parse(Some("active")), ContentState::Active);
        assert_eq!(ContentState::parse(Some("draft")), ContentState::Active);
        assert_eq!(ContentState::parse(None), ContentState::Active);
    }

    #[test]
    fn test_parse_date_formats() {
        let d = parse_date("2024-06-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 6, 1));

        assert!(parse_date("2024-06-01T10:30:00Z").is_some());
        assert!(parse_date("2024-06-01T10:30:00+02:00").is_some());
        assert!(parse_date("2024-06-01 10:30:00").is_some());
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("sometime in spring").is_none());
    }

    #[test]
    fn test_effective_date_prefers_end_date() {
        let mut r = raw("a");
        r.end_date = Some("2024-03-05".to_string());
        let record = r.into_record(ContentType::Blog).unwrap();
        assert_eq!(record.effective_date().unwrap().month(), 3);
    }

    #[test]
    fn test_blank_end_date_falls_back_to_start() {
        let mut r = raw("a");
        r.end_date = Some("  ".to_string());
        let record = r.into_record(ContentType::Blog).unwrap();
        assert_eq!(record.end_date, None);
        assert_eq!(record.effective_date().unwrap().month(), 1);
    }

    #[test]
    fn test_unparsable_end_date_has_no_effective_date() {
        let mut r = raw("a");
        r.end_date = Some("ongoing".to_string());
        let record = r.into_record(ContentType::Fiction).unwrap();
        assert_eq!(record.effective_date(), None);
    }

    #[test]
    fn test_last_modified_prefers_updated_at() {
        let mut r = raw("a");
        r.updated_at = Some("2025-02-02".to_string());
        let record = r.into_record(ContentType::Blog).unwrap();
        assert_eq!(record.last_modified().unwrap().year(), 2025);
    }

    #[test]
    fn test_into_record_requires_slug() {
        let r = RawRecord {
            title: Some("Untitled".to_string()),
            ..Default::default()
        };
        assert!(r.into_record(ContentType::Notes).is_none());
    }

    #[test]
    fn test_verse_type_substitutes_category() {
        let mut r = raw("ode");
        r.verse_type = Some("Sonnet".to_string());
        let record = r.into_record(ContentType::Verse).unwrap();
        assert_eq!(record.category.as_deref(), Some("Sonnet"));
    }

    #[test]
    fn test_importance_clamped() {
        let mut r = raw("a");
        r.importance = Some(42);
        assert_eq!(r.into_record(ContentType::Essays).unwrap().importance, Some(10));

        let mut r = raw("b");
        r.importance = Some(-3);
        assert_eq!(r.into_record(ContentType::Essays).unwrap().importance, Some(0));
    }

    #[test]
    fn test_title_defaults_to_slug() {
        let record = raw("quiet-slug").into_record(ContentType::Notes).unwrap();
        assert_eq!(record.title, "quiet-slug");
    }

    #[test]
    fn test_raw_record_deserializes_camel_case() {
        let json = r#"{
            "title": "On Walking",
            "slug": "on-walking",
            "category": "Philosophy",
            "startDate": "2023-09-01",
            "endDate": "",
            "tags": ["walking", " "],
            "status": "Finished",
            "confidence": "likely",
            "importance": 7,
            "description": "A short piece.",
            "state": "active"
        }"#;
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        let record = raw.into_record(ContentType::Essays).unwrap();
        assert_eq!(record.tags, vec!["walking".to_string()]);
        assert_eq!(record.status, Some(Status::Finished));
        assert_eq!(record.confidence, Some(Confidence::Likely));
        assert_eq!(record.preview, "A short piece.");
        assert_eq!(record.end_date, None);
    }
}
