//! SFNT font table reader
//!
//! Reads just enough of a TrueType/OpenType file (or the first face of a
//! collection) to register it in a font-family descriptor: the family name
//! from `name`, the weight class and style bits from `OS/2`, `head` and
//! `post`.

use thiserror::Error;

const TAG_TRUE_TYPE: u32 = 0x0001_0000;
const TAG_OTTO: u32 = u32::from_be_bytes(*b"OTTO");
const TAG_TRUE: u32 = u32::from_be_bytes(*b"true");
const TAG_TTCF: u32 = u32::from_be_bytes(*b"ttcf");

const NAME_FAMILY: u16 = 1;
const NAME_PREFERRED_FAMILY: u16 = 16;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_MAC: u16 = 1;
const PLATFORM_WINDOWS: u16 = 3;

const DEFAULT_WEIGHT: u16 = 400;

/// Errors reading font tables
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FontError {
    #[error("font data is truncated")]
    Truncated,
    #[error("unsupported font format 0x{0:08x}")]
    UnknownFormat(u32),
    #[error("font has no '{0}' table")]
    MissingTable(&'static str),
    #[error("font has no family name")]
    NoFamilyName,
}

/// Metadata needed to register a font face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetadata {
    /// Preferred family if present, else family; English if available
    pub family: String,
    /// Raw `usWeightClass`
    pub weight_class: u16,
    pub is_italic: bool,
}

/// Read metadata from the bytes of a font file
pub fn read_metadata(data: &[u8]) -> Result<FontMetadata, FontError> {
    let face = Face::parse(data)?;

    let name = face.table(b"name").ok_or(FontError::MissingTable("name"))?;
    let family = family_name(name)?;

    let os2 = face.table(b"OS/2");
    let weight_class = os2
        .and_then(|t| read_u16(t, 4))
        .unwrap_or(DEFAULT_WEIGHT);
    let fs_selection_italic = os2.and_then(|t| read_u16(t, 62)).map(|s| s & 0x0001 != 0);
    let mac_style_italic = face
        .table(b"head")
        .and_then(|t| read_u16(t, 44))
        .map(|s| s & 0x0002 != 0);
    let italic_angle = face
        .table(b"post")
        .and_then(|t| read_u32(t, 4))
        .map(|fixed| fixed as i32);

    let is_italic = match (fs_selection_italic, mac_style_italic) {
        (Some(a), Some(b)) if a == b => a,
        (Some(a), None) | (None, Some(a)) if italic_angle.is_none() => a,
        _ => italic_angle.is_some_and(|angle| angle != 0),
    };

    Ok(FontMetadata {
        family,
        weight_class,
        is_italic,
    })
}

/// Table directory of one face
struct Face<'a> {
    data: &'a [u8],
    tables: Vec<([u8; 4], usize, usize)>,
}

impl<'a> Face<'a> {
    fn parse(data: &'a [u8]) -> Result<Self, FontError> {
        let tag = read_u32(data, 0).ok_or(FontError::Truncated)?;
        let offset = match tag {
            TAG_TTCF => {
                let count = read_u32(data, 8).ok_or(FontError::Truncated)?;
                if count == 0 {
                    return Err(FontError::Truncated);
                }
                read_u32(data, 12).ok_or(FontError::Truncated)? as usize
            }
            TAG_TRUE_TYPE | TAG_OTTO | TAG_TRUE => 0,
            other => return Err(FontError::UnknownFormat(other)),
        };

        let face_tag = read_u32(data, offset).ok_or(FontError::Truncated)?;
        if !matches!(face_tag, TAG_TRUE_TYPE | TAG_OTTO | TAG_TRUE) {
            return Err(FontError::UnknownFormat(face_tag));
        }
        let num_tables = read_u16(data, offset + 4).ok_or(FontError::Truncated)? as usize;

        let mut tables = Vec::with_capacity(num_tables);
        for i in 0..num_tables {
            let record = offset + 12 + i * 16;
            let tag = data.get(record..record + 4).ok_or(FontError::Truncated)?;
            let table_offset = read_u32(data, record + 8).ok_or(FontError::Truncated)? as usize;
            let length = read_u32(data, record + 12).ok_or(FontError::Truncated)? as usize;
            tables.push(([tag[0], tag[1], tag[2], tag[3]], table_offset, length));
        }
        Ok(Self { data, tables })
    }

    /// Bytes of a table; `None` if absent or out of bounds
    fn table(&self, tag: &[u8; 4]) -> Option<&'a [u8]> {
        let (_, offset, length) = self.tables.iter().find(|(t, _, _)| t == tag)?;
        self.data.get(*offset..offset.checked_add(*length)?)
    }
}

struct NameRecord {
    platform: u16,
    language: u16,
    name_id: u16,
    value: String,
}

impl NameRecord {
    fn is_english(&self) -> bool {
        match self.platform {
            PLATFORM_WINDOWS => self.language & 0x00ff == 0x09,
            PLATFORM_MAC => self.language == 0,
            _ => false,
        }
    }
}

fn name_records(table: &[u8]) -> Result<Vec<NameRecord>, FontError> {
    let count = read_u16(table, 2).ok_or(FontError::Truncated)? as usize;
    let storage = read_u16(table, 4).ok_or(FontError::Truncated)? as usize;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let at = 6 + i * 12;
        let field = |n: usize| read_u16(table, at + n * 2).ok_or(FontError::Truncated);
        let (platform, encoding, language, name_id) = (field(0)?, field(1)?, field(2)?, field(3)?);
        let (length, offset) = (field(4)? as usize, field(5)? as usize);

        let start = storage + offset;
        let Some(raw) = table.get(start..start + length) else {
            continue;
        };
        let value = match platform {
            PLATFORM_UNICODE | PLATFORM_WINDOWS => decode_utf16be(raw),
            PLATFORM_MAC if encoding == 0 => raw.iter().map(|&b| b as char).collect(),
            _ => continue,
        };
        records.push(NameRecord {
            platform,
            language,
            name_id,
            value,
        });
    }
    Ok(records)
}

/// Preferred family if present, else family; English if present, else the
/// first record
fn family_name(table: &[u8]) -> Result<String, FontError> {
    let records = name_records(table)?;
    [NAME_PREFERRED_FAMILY, NAME_FAMILY]
        .iter()
        .find_map(|&id| {
            let candidates: Vec<&NameRecord> = records
                .iter()
                .filter(|r| r.name_id == id && !r.value.trim().is_empty())
                .collect();
            candidates
                .iter()
                .find(|r| r.is_english())
                .or_else(|| candidates.first())
                .map(|r| r.value.trim().to_string())
        })
        .ok_or(FontError::NoFamilyName)
}

fn decode_utf16be(raw: &[u8]) -> String {
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
