//! JSON Feed 1.1 writer

use chrono::SecondsFormat;
use serde::Serialize;

use super::{FeedItem, FeedMeta};
use crate::Result;

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    language: &'a str,
    authors: Vec<Author<'a>>,
    items: Vec<JsonFeedItem<'a>>,
}

#[derive(Debug, Serialize)]
struct Author<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonFeedItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    content_text: &'a str,
    content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    tags: &'a [String],
}

impl<'a> From<&'a FeedItem> for JsonFeedItem<'a> {
    fn from(item: &'a FeedItem) -> Self {
        Self {
            id: &item.url,
            url: &item.url,
            title: &item.title,
            content_text: &item.summary,
            content_html: format!("<p>{}</p>", html_escape::encode_text(&item.summary)),
            date_published: item
                .published
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
            tags: &item.tags,
        }
    }
}

pub(super) fn render(meta: &FeedMeta, items: &[FeedItem]) -> Result<String> {
    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &meta.title,
        home_page_url: &meta.site_url,
        feed_url: &meta.self_url,
        description: &meta.description,
        language: &meta.language,
        authors: vec![Author { name: &meta.author }],
        items: items.iter().map(JsonFeedItem::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&feed)?)
}
