//! Font family service
//!
//! Pure logic behind Android font-family descriptors: weight rounding, id
//! normalization and the `(weight, style)` keyed entry set of one family
//! document. Reading font files and XML lives in infrastructure.

use std::fmt;

/// Fallback for names that normalize to nothing
const FALLBACK_ID: &str = "font";

/// Style axis of a font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn from_italic(is_italic: bool) -> Self {
        if is_italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }

    /// Parse the `app:fontStyle` attribute value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "normal" => Some(FontStyle::Normal),
            "italic" => Some(FontStyle::Italic),
            _ => None,
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round a raw `usWeightClass` to a multiple of 100 in `[100, 900]`.
///
/// Below 500 rounds down, above 500 rounds up, and 500 itself maps to 400.
pub fn round_weight(raw: u16) -> u16 {
    let rounded = if raw < 500 {
        (raw / 100) * 100
    } else if raw == 500 {
        400
    } else {
        raw.div_ceil(100).saturating_mul(100)
    };
    rounded.clamp(100, 900)
}

/// Normalize a display name into an Android resource identifier.
///
/// Runs of anything but ASCII letters and digits collapse to a single `_`;
/// the result is lower-case and never empty.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        out
    }
}

/// Resource id of a font file inside `res/font`
///
/// A face whose stem normalizes to the family id would clash with the family
/// document, so it gets a `_font` suffix.
pub fn font_resource_id(file_stem: &str, family_id: &str) -> String {
    let id = normalize_name(file_stem);
    if id == family_id {
        format!("{}_font", id)
    } else {
        id
    }
}

/// Everything needed to register one font face in a family document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Family display name, as passed to the font manager
    pub family: String,
    /// Normalized family name; also the descriptor file stem
    pub family_id: String,
    /// Normalized font file stem inside `res/font`
    pub font_id: String,
    pub weight: u16,
    pub style: FontStyle,
}

impl FontDescriptor {
    /// Build a descriptor from raw metadata
    pub fn new(family: &str, file_stem: &str, raw_weight: u16, is_italic: bool) -> Self {
        let family_id = normalize_name(family);
        let font_id = font_resource_id(file_stem, &family_id);
        Self {
            family: family.to_string(),
            family_id,
            font_id,
            weight: round_weight(raw_weight),
            style: FontStyle::from_italic(is_italic),
        }
    }

    /// Entry to merge into the family document
    pub fn entry(&self) -> FontEntry {
        FontEntry {
            style: self.style,
            weight: self.weight,
            font: font_reference(&self.font_id),
        }
    }
}

/// `@font/<id>` reference used by descriptor entries
pub fn font_reference(font_id: &str) -> String {
    format!("@font/{}", font_id)
}

/// One `<font/>` element of a family document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub style: FontStyle,
    pub weight: u16,
    /// `@font/<id>` reference
    pub font: String,
}

/// Entry set of one `res/font/<family_id>.xml` document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFamily {
    entries: Vec<FontEntry>,
}

impl FontFamily {
    pub fn new() -> Self {
        Self::default()
    }

    /// Family from parsed entries; later duplicates of a `(weight, style)` win
    pub fn from_entries(entries: impl IntoIterator<Item = FontEntry>) -> Self {
        let mut family = Self::new();
        for entry in entries {
            family.upsert(entry);
        }
        family
    }

    pub fn entries(&self) -> &[FontEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the entry with the same `(weight, style)` or append, keeping
    /// the set sorted by weight then style
    pub fn upsert(&mut self, entry: FontEntry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.weight == entry.weight && e.style == entry.style)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self.entries.sort_by_key(|e| (e.weight, e.style));
    }

    /// Drop every entry that references `font`. Returns whether any was dropped.
    pub fn remove_font(&mut self, font: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.font != font);
        self.entries.len() != before
    }

    pub fn references(&self, font: &str) -> bool {
        self.entries.iter().any(|e| e.font == font)
    }
}
