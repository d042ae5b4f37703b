//! Android font-family descriptor documents
//!
//! Reads and writes `res/font/<family_id>.xml`:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <font-family xmlns:app="http://schemas.android.com/apk/res-auto">
//!     <font app:fontStyle="normal" app:fontWeight="400" app:font="@font/lato"/>
//! </font-family>
//! ```
//!
//! Only `<font/>` children of the root are kept. Attributes in the `android:`
//! namespace are accepted as a fallback when the `app:` ones are missing.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

use crate::domain::services::{FontEntry, FontFamily, FontStyle};

const APP_NS: &str = "http://schemas.android.com/apk/res-auto";
const INDENT: usize = 4;

/// Font descriptor errors
#[derive(Debug, Error)]
pub enum FontXmlError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid font-family document: {0}")]
    InvalidStructure(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Parse a family document into its entry set
pub fn parse_font_family(xml: &str) -> Result<FontFamily, FontXmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut saw_root = false;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if depth == 0 {
                    expect_root(e)?;
                    saw_root = true;
                } else if depth == 1 && e.name().as_ref() == b"font" {
                    entries.push(parse_font(e)?);
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if depth == 0 {
                    expect_root(e)?;
                    saw_root = true;
                } else if depth == 1 && e.name().as_ref() == b"font" {
                    entries.push(parse_font(e)?);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(FontXmlError::InvalidStructure(
            "missing <font-family> root".to_string(),
        ));
    }
    Ok(FontFamily::from_entries(entries))
}

fn expect_root(e: &BytesStart<'_>) -> Result<(), FontXmlError> {
    if e.name().as_ref() == b"font-family" {
        Ok(())
    } else {
        Err(FontXmlError::InvalidStructure(format!(
            "unexpected root <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        )))
    }
}

fn parse_font(e: &BytesStart<'_>) -> Result<FontEntry, FontXmlError> {
    let mut style = None;
    let mut weight = None;
    let mut font = None;

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = attr.unescape_value()?.into_owned();
        // `app:` wins over `android:` regardless of attribute order
        let (is_app, local) = match key.split_once(':') {
            Some(("app", local)) => (true, local.to_string()),
            Some(("android", local)) => (false, local.to_string()),
            _ => continue,
        };
        let slot = match local.as_str() {
            "fontStyle" => &mut style,
            "fontWeight" => &mut weight,
            "font" => &mut font,
            _ => continue,
        };
        if is_app || slot.is_none() {
            *slot = Some(value);
        }
    }

    let style = match style {
        Some(value) => FontStyle::parse(&value).ok_or_else(|| {
            FontXmlError::InvalidStructure(format!("unknown fontStyle '{}'", value))
        })?,
        None => FontStyle::Normal,
    };
    let weight = match weight {
        Some(value) => value.trim().parse::<u16>().map_err(|_| {
            FontXmlError::InvalidStructure(format!("invalid fontWeight '{}'", value))
        })?,
        None => 400,
    };
    let font = font.ok_or_else(|| {
        FontXmlError::InvalidStructure("<font> without a font reference".to_string())
    })?;

    Ok(FontEntry {
        style,
        weight,
        font,
    })
}

/// Serialize a family document with 4-space indentation and a trailing newline
pub fn render_font_family(family: &FontFamily) -> Result<String, FontXmlError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("font-family");
    root.push_attribute(("xmlns:app", APP_NS));
    writer.write_event(Event::Start(root))?;

    for entry in family.entries() {
        let weight = entry.weight.to_string();
        let mut font = BytesStart::new("font");
        font.push_attribute(("app:fontStyle", entry.style.as_str()));
        font.push_attribute(("app:fontWeight", weight.as_str()));
        font.push_attribute(("app:font", entry.font.as_str()));
        writer.write_event(Event::Empty(font))?;
    }

    writer.write_event(Event::End(BytesEnd::new("font-family")))?;

    let mut text = String::from_utf8(writer.into_inner().into_inner())?;
    text.push('\n');
    Ok(text)
}
