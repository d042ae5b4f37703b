//! XML property lists (`Info.plist`)
//!
//! Dictionaries keep key order. Numbers and dates are kept as written so a
//! document that is only read and re-written changes as little as possible.
//! Output follows Xcode: tab indentation with the root `<dict>` at column 0.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Key listing fonts bundled with an iOS app
pub const APP_FONTS_KEY: &str = "UIAppFonts";
/// Key pointing macOS at the directory holding bundled fonts
pub const FONTS_PATH_KEY: &str = "ATSApplicationFontsPath";

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
"#;

/// Property list errors
#[derive(Debug, Error)]
pub enum PlistError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid property list: {0}")]
    InvalidStructure(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<quick_xml::escape::EscapeError> for PlistError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        PlistError::Xml(err.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    String(String),
    Integer(String),
    Real(String),
    Bool(bool),
    Date(String),
    Data(String),
    Array(Vec<PlistValue>),
    Dict(IndexMap<String, PlistValue>),
}

impl PlistValue {
    pub fn as_dict(&self) -> Option<&IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Resolve an `INFOPLIST_FILE` build setting against the platform directory
pub fn info_plist_path(platform_root: &Path, setting: &str) -> PathBuf {
    let cleaned = setting.replace('"', "").replace("$(SRCROOT)", "");
    platform_root.join(cleaned.trim_start_matches('/'))
}

/// Append font basenames to `UIAppFonts`, keeping existing order and
/// dropping duplicates. Returns whether the list changed.
pub fn add_app_fonts(root: &mut PlistValue, fonts: &[String]) -> bool {
    let Some(dict) = root.as_dict_mut() else {
        return false;
    };
    let before = dict.get(APP_FONTS_KEY).cloned();

    let mut names: Vec<String> = match dict.get(APP_FONTS_KEY) {
        Some(PlistValue::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    names.extend(fonts.iter().cloned());

    let mut seen = std::collections::HashSet::new();
    names.retain(|name| seen.insert(name.clone()));

    let after = PlistValue::Array(names.into_iter().map(PlistValue::String).collect());
    let changed = before.as_ref() != Some(&after);
    dict.insert(APP_FONTS_KEY.to_string(), after);
    changed
}

/// Drop font basenames from `UIAppFonts`. Returns whether the list changed.
pub fn remove_app_fonts(root: &mut PlistValue, fonts: &[String]) -> bool {
    let Some(PlistValue::Array(items)) = root
        .as_dict_mut()
        .and_then(|dict| dict.get_mut(APP_FONTS_KEY))
    else {
        return false;
    };
    let before = items.len();
    items.retain(|v| v.as_str().map_or(true, |name| !fonts.iter().any(|f| f == name)));
    items.len() != before
}

/// Set `ATSApplicationFontsPath` to the bundle resources directory.
/// Returns whether the value changed.
pub fn set_fonts_path(root: &mut PlistValue) -> bool {
    let Some(dict) = root.as_dict_mut() else {
        return false;
    };
    let value = PlistValue::String(".".to_string());
    if dict.get(FONTS_PATH_KEY) == Some(&value) {
        return false;
    }
    dict.insert(FONTS_PATH_KEY.to_string(), value);
    true
}

enum Frame {
    Array(Vec<PlistValue>),
    Dict {
        map: IndexMap<String, PlistValue>,
        key: Option<String>,
    },
}

/// Parse an XML property list document
pub fn parse_plist(xml: &str) -> Result<PlistValue, PlistError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<PlistValue> = None;

    loop {
        let event = reader.read_event()?;
        let value = match event {
            Event::Start(ref e) => match e.name().as_ref() {
                b"plist" => continue,
                b"array" => {
                    stack.push(Frame::Array(Vec::new()));
                    continue;
                }
                b"dict" => {
                    stack.push(Frame::Dict {
                        map: IndexMap::new(),
                        key: None,
                    });
                    continue;
                }
                b"key" => {
                    let key = read_leaf(&mut reader, e)?;
                    match stack.last_mut() {
                        Some(Frame::Dict { key: slot, .. }) => *slot = Some(key),
                        _ => {
                            return Err(PlistError::InvalidStructure(
                                "<key> outside of a <dict>".to_string(),
                            ))
                        }
                    }
                    continue;
                }
                _ => leaf(e, read_leaf(&mut reader, e)?)?,
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"true" => PlistValue::Bool(true),
                b"false" => PlistValue::Bool(false),
                b"array" => PlistValue::Array(Vec::new()),
                b"dict" => PlistValue::Dict(IndexMap::new()),
                b"plist" => continue,
                _ => leaf(e, String::new())?,
            },
            Event::End(ref e) => match e.name().as_ref() {
                b"array" | b"dict" => match stack.pop() {
                    Some(Frame::Array(items)) => PlistValue::Array(items),
                    Some(Frame::Dict { map, .. }) => PlistValue::Dict(map),
                    None => {
                        return Err(PlistError::InvalidStructure(
                            "unbalanced container".to_string(),
                        ))
                    }
                },
                _ => continue,
            },
            Event::Eof => break,
            _ => continue,
        };

        match stack.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Dict { map, key }) => {
                let key = key.take().ok_or_else(|| {
                    PlistError::InvalidStructure("dictionary value without a <key>".to_string())
                })?;
                map.insert(key, value);
            }
            None if root.is_none() => root = Some(value),
            None => {
                return Err(PlistError::InvalidStructure(
                    "more than one root value".to_string(),
                ))
            }
        }
    }

    if !stack.is_empty() {
        return Err(PlistError::InvalidStructure(
            "unterminated container".to_string(),
        ));
    }
    root.ok_or_else(|| PlistError::InvalidStructure("document has no value".to_string()))
}

fn read_leaf(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<String, PlistError> {
    let raw = reader.read_text(start.name())?;
    Ok(unescape(&raw)?.into_owned())
}

fn leaf(start: &BytesStart<'_>, text: String) -> Result<PlistValue, PlistError> {
    Ok(match start.name().as_ref() {
        b"string" => PlistValue::String(text),
        b"integer" => PlistValue::Integer(text.trim().to_string()),
        b"real" => PlistValue::Real(text.trim().to_string()),
        b"date" => PlistValue::Date(text.trim().to_string()),
        b"data" => PlistValue::Data(text.trim().to_string()),
        other => {
            return Err(PlistError::InvalidStructure(format!(
                "unknown element <{}>",
                String::from_utf8_lossy(other)
            )))
        }
    })
}

/// Serialize a property list document with a trailing newline
pub fn render_plist(root: &PlistValue) -> Result<String, PlistError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1);
    write_value(&mut writer, root)?;
    let body = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(format!("{}{}\n</plist>\n", HEADER, body))
}

type PlistWriter = Writer<Cursor<Vec<u8>>>;

fn write_text(writer: &mut PlistWriter, tag: &str, text: &str) -> Result<(), PlistError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_value(writer: &mut PlistWriter, value: &PlistValue) -> Result<(), PlistError> {
    match value {
        PlistValue::String(s) => write_text(writer, "string", s)?,
        PlistValue::Integer(s) => write_text(writer, "integer", s)?,
        PlistValue::Real(s) => write_text(writer, "real", s)?,
        PlistValue::Date(s) => write_text(writer, "date", s)?,
        PlistValue::Data(s) => write_text(writer, "data", s)?,
        PlistValue::Bool(b) => {
            let tag = if *b { "true" } else { "false" };
            writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        }
        PlistValue::Array(items) if items.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new("array")))?;
        }
        PlistValue::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("array")))?;
        }
        PlistValue::Dict(map) if map.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new("dict")))?;
        }
        PlistValue::Dict(map) => {
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, item) in map {
                write_text(writer, "key", key)?;
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
    }
    Ok(())
}
