use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use super::assembler::RenderedFeed;
use crate::util::strip_xml_invalid_chars;

/// Errors that can occur while serializing a feed to XML.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The XML writer failed.
    #[error("XML write error: {0}")]
    Xml(String),

    /// The writer produced bytes that are not UTF-8.
    #[error("Generated RSS contains invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Output knobs for [`render_rss`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level. 0 writes everything on one line.
    pub indent: usize,
    /// Drop characters XML 1.0 forbids from values before writing.
    pub strip_control_chars: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            strip_control_chars: true,
        }
    }
}

/// Serializes a finalized feed as an RSS 2.0 document.
///
/// Channel elements come first in whitelist order, followed by one `<item>`
/// per item, its fields also in whitelist order. Values are escaped by the
/// writer.
///
/// # Errors
///
/// Returns an error if the XML writer fails.
pub fn render_rss(feed: &RenderedFeed, options: &RenderOptions) -> Result<String, RenderError> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', options.indent)
    } else {
        Writer::new(Cursor::new(Vec::new()))
    };

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    write(&mut writer, Event::Start(rss))?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    for (name, value) in feed.ordered_properties() {
        write_text_element(&mut writer, name, value, options)?;
    }

    for item in &feed.items {
        write(&mut writer, Event::Start(BytesStart::new("item")))?;
        for (name, value) in feed.ordered_fields(item) {
            write_text_element(&mut writer, name, value, options)?;
        }
        write(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    tracing::debug!(bytes = bytes.len(), items = feed.items.len(), "Rendered RSS");
    Ok(String::from_utf8(bytes)?)
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let value = if options.strip_control_chars {
        strip_xml_invalid_chars(value)
    } else {
        value.into()
    };

    write(writer, Event::Start(BytesStart::new(name)))?;
    if !value.is_empty() {
        write(writer, Event::Text(BytesText::new(&value)))?;
    }
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|e| RenderError::Xml(e.to_string()))
}
