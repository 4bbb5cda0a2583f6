//! quick-xml helpers shared by the RSS, Atom and sitemap writers

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, Result};

pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn render_error(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// New indented writer with the `<?xml ... ?>` declaration already written
pub(crate) fn document() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_error)?;
    Ok(writer)
}

pub(crate) fn open(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element)).map_err(render_error)
}

pub(crate) fn close(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(render_error)
}

/// `<name>text</name>` with the text escaped
pub(crate) fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(render_error)?;
    Ok(())
}

pub(crate) fn finish(writer: XmlWriter) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(render_error)
}
