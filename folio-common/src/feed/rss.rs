//! RSS 2.0 writer

use quick_xml::events::{BytesStart, BytesText};

use super::{latest, FeedItem, FeedMeta};
use crate::xml::{self, render_error};
use crate::Result;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub(super) fn render(meta: &FeedMeta, items: &[FeedItem]) -> Result<String> {
    let mut writer = xml::document()?;

    xml::open(
        &mut writer,
        BytesStart::new("rss").with_attributes([("version", "2.0"), ("xmlns:atom", ATOM_NAMESPACE)]),
    )?;
    xml::open(&mut writer, BytesStart::new("channel"))?;

    xml::text_element(&mut writer, "title", &meta.title)?;
    xml::text_element(&mut writer, "link", &meta.site_url)?;
    xml::text_element(&mut writer, "description", &meta.description)?;
    xml::text_element(&mut writer, "language", &meta.language)?;
    if let Some(updated) = latest(items) {
        xml::text_element(&mut writer, "lastBuildDate", &updated.to_rfc2822())?;
    }
    writer
        .create_element("atom:link")
        .with_attributes([
            ("href", meta.self_url.as_str()),
            ("rel", "self"),
            ("type", "application/rss+xml"),
        ])
        .write_empty()
        .map_err(render_error)?;

    for item in items {
        xml::open(&mut writer, BytesStart::new("item"))?;
        xml::text_element(&mut writer, "title", &item.title)?;
        xml::text_element(&mut writer, "link", &item.url)?;
        writer
            .create_element("guid")
            .with_attribute(("isPermaLink", "true"))
            .write_text_content(BytesText::new(&item.url))
            .map_err(render_error)?;
        // Undated items carry no pubDate rather than a misleading one
        if let Some(published) = item.published {
            xml::text_element(&mut writer, "pubDate", &published.to_rfc2822())?;
        }
        xml::text_element(&mut writer, "description", &item.summary)?;
        for tag in &item.tags {
            xml::text_element(&mut writer, "category", tag)?;
        }
        xml::close(&mut writer, "item")?;
    }

    xml::close(&mut writer, "channel")?;
    xml::close(&mut writer, "rss")?;
    xml::finish(writer)
}
