//! XML sitemap builder
//!
//! Fixed top-level pages come first, followed by one entry per visible
//! content record. Locations are deduplicated; the first occurrence wins.

use quick_xml::events::BytesStart;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::canonical::absolute_url;
use crate::content::{ContentRecord, ContentType};
use crate::xml;
use crate::Result;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

/// Fixed page listed in every sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    #[serde(default = "default_page_priority")]
    pub priority: f32,
    #[serde(default)]
    pub change_frequency: Option<ChangeFrequency>,
}

fn default_page_priority() -> f32 {
    0.5
}

/// Home, about, feeds, and one index page per content type
pub fn default_static_pages() -> Vec<StaticPage> {
    let mut pages = vec![StaticPage {
        path: "/".to_string(),
        priority: 1.0,
        change_frequency: Some(ChangeFrequency::Daily),
    }];
    pages.extend(ContentType::ALL.iter().map(|ty| StaticPage {
        path: format!("/{}", ty),
        priority: 0.7,
        change_frequency: Some(ChangeFrequency::Weekly),
    }));
    pages.push(StaticPage {
        path: "/about".to_string(),
        priority: 0.5,
        change_frequency: Some(ChangeFrequency::Yearly),
    });
    pages.push(StaticPage {
        path: "/feeds".to_string(),
        priority: 0.3,
        change_frequency: Some(ChangeFrequency::Monthly),
    });
    pages
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub location: String,
    /// `YYYY-MM-DD`
    pub last_modified: Option<String>,
    pub priority: f32,
    pub change_frequency: Option<ChangeFrequency>,
}

pub fn build_entries(
    site_url: &str,
    static_pages: &[StaticPage],
    records: &[ContentRecord],
) -> Vec<SitemapEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(static_pages.len() + records.len());

    for page in static_pages {
        let location = absolute_url(site_url, &page.path);
        if seen.insert(location.clone()) {
            entries.push(SitemapEntry {
                location,
                last_modified: None,
                priority: page.priority,
                change_frequency: page.change_frequency,
            });
        }
    }

    for record in records.iter().filter(|r| !r.is_hidden()) {
        let location = absolute_url(site_url, &record.canonical_path());
        if seen.insert(location.clone()) {
            entries.push(SitemapEntry {
                location,
                last_modified: record
                    .last_modified()
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                priority: record.content_type.sitemap_priority(),
                change_frequency: None,
            });
        }
    }

    entries
}

pub fn render(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = xml::document()?;
    xml::open(
        &mut writer,
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    )?;

    for entry in entries {
        xml::open(&mut writer, BytesStart::new("url"))?;
        xml::text_element(&mut writer, "loc", &entry.location)?;
        if let Some(lastmod) = &entry.last_modified {
            xml::text_element(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(freq) = entry.change_frequency {
            xml::text_element(&mut writer, "changefreq", freq.as_str())?;
        }
        xml::text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        xml::close(&mut writer, "url")?;
    }

    xml::close(&mut writer, "urlset")?;
    xml::finish(writer)
}
