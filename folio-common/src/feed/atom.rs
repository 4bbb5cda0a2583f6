//! Atom 1.0 writer

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::BytesStart;

use super::{latest, FeedItem, FeedMeta};
use crate::xml::{self, render_error};
use crate::Result;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

fn rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(super) fn render(meta: &FeedMeta, items: &[FeedItem]) -> Result<String> {
    // <updated> is mandatory; an empty or undated feed reports the epoch
    let feed_updated = latest(items).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let mut writer = xml::document()?;
    xml::open(
        &mut writer,
        BytesStart::new("feed").with_attributes([
            ("xmlns", ATOM_NAMESPACE),
            ("xml:lang", meta.language.as_str()),
        ]),
    )?;

    xml::text_element(&mut writer, "title", &meta.title)?;
    xml::text_element(&mut writer, "subtitle", &meta.description)?;
    xml::text_element(&mut writer, "id", &meta.self_url)?;
    writer
        .create_element("link")
        .with_attribute(("href", meta.site_url.as_str()))
        .write_empty()
        .map_err(render_error)?;
    writer
        .create_element("link")
        .with_attributes([("href", meta.self_url.as_str()), ("rel", "self")])
        .write_empty()
        .map_err(render_error)?;
    xml::text_element(&mut writer, "updated", &rfc3339(feed_updated))?;
    xml::open(&mut writer, BytesStart::new("author"))?;
    xml::text_element(&mut writer, "name", &meta.author)?;
    xml::close(&mut writer, "author")?;

    for item in items {
        xml::open(&mut writer, BytesStart::new("entry"))?;
        xml::text_element(&mut writer, "title", &item.title)?;
        xml::text_element(&mut writer, "id", &item.url)?;
        writer
            .create_element("link")
            .with_attributes([("href", item.url.as_str()), ("rel", "alternate")])
            .write_empty()
            .map_err(render_error)?;
        xml::text_element(
            &mut writer,
            "updated",
            &rfc3339(item.published.unwrap_or(feed_updated)),
        )?;
        if let Some(published) = item.published {
            xml::text_element(&mut writer, "published", &rfc3339(published))?;
        }
        xml::text_element(&mut writer, "summary", &item.summary)?;
        for tag in &item.tags {
            writer
                .create_element("category")
                .with_attribute(("term", tag.as_str()))
                .write_empty()
                .map_err(render_error)?;
        }
        xml::close(&mut writer, "entry")?;
    }

    xml::close(&mut writer, "feed")?;
    xml::finish(writer)
}
