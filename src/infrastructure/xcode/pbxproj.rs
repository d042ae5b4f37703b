//! Old-style ASCII property list parser for `project.pbxproj`
//!
//! The parser never rewrites text. Every node records the byte range it was
//! read from, so edits are applied as splices on the original document and
//! whatever was not touched keeps its exact bytes, comments and layout.

use std::ops::Range;

use indexmap::IndexMap;
use thiserror::Error;

/// Errors reading or editing a project file
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PbxprojError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("project has no {0}")]
    Missing(String),

    #[error("object {id} has no array '{key}'")]
    MissingArray { id: String, key: String },
}

/// A parsed value and the bytes it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: Value,
    /// Range of the value token (brackets included for containers)
    pub span: Range<usize>,
    /// `/* ... */` annotation following the value, if any
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Quoted or bare string, unescaped
    String(String),
    /// `<hex>` data, kept as written
    Data(String),
    Array(Vec<Item>),
    Dict(IndexMap<String, Entry>),
}

/// Array element; `extent` runs through the trailing comma
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub node: Node,
    pub extent: Range<usize>,
}

/// Dictionary entry; `extent` runs from the key through the `;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key_comment: Option<String>,
    pub node: Node,
    pub extent: Range<usize>,
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Item]> {
        match &self.value {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&IndexMap<String, Entry>> {
        match &self.value {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Dictionary member lookup
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_dict()?.get(key).map(|entry| &entry.node)
    }

    /// String elements of an array member
    pub fn strings(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .and_then(Node::as_array)
            .map(|items| items.iter().filter_map(|i| i.node.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Parse a whole document. The top level must be a dictionary.
pub fn parse(text: &str) -> Result<Node, PbxprojError> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    parser.skip_trivia()?;
    let root = parser.value()?;
    if root.as_dict().is_none() {
        return Err(parser.error_at(root.span.start, "top level is not a dictionary"));
    }
    parser.skip_trivia()?;
    if parser.pos < parser.bytes.len() {
        return Err(parser.error("unexpected data after the root dictionary"));
    }
    Ok(root)
}

/// Quote a string the way Xcode writes it
pub fn quote(value: &str) -> String {
    let bare = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'.' | b'/'));
    if bare {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> PbxprojError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: &str) -> PbxprojError {
        let end = offset.min(self.bytes.len());
        let line = self.bytes[..end].iter().filter(|b| **b == b'\n').count() + 1;
        PbxprojError::Syntax {
            line,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, pat: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pat)
    }

    /// Skip whitespace and comments; return the last block comment seen
    fn skip_trivia(&mut self) -> Result<Option<String>, PbxprojError> {
        let mut comment = None;
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.starts_with(b"/*") => {
                    let start = self.pos + 2;
                    let len = self.text[start..]
                        .find("*/")
                        .ok_or_else(|| self.error("unterminated comment"))?;
                    comment = Some(self.text[start..start + len].trim().to_string());
                    self.pos = start + len + 2;
                }
                Some(b'/') if self.starts_with(b"//") => {
                    self.pos = self.text[self.pos..]
                        .find('\n')
                        .map_or(self.bytes.len(), |n| self.pos + n + 1);
                }
                _ => return Ok(comment),
            }
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), PbxprojError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn value(&mut self) -> Result<Node, PbxprojError> {
        let start = self.pos;
        let value = match self.peek() {
            Some(b'{') => self.dict()?,
            Some(b'(') => self.array()?,
            Some(b'"') => Value::String(self.quoted()?),
            Some(b'<') => self.data()?,
            Some(_) => Value::String(self.bare()?),
            None => return Err(self.error("unexpected end of file")),
        };
        Ok(Node {
            value,
            span: start..self.pos,
            comment: None,
        })
    }

    fn dict(&mut self) -> Result<Value, PbxprojError> {
        self.expect(b'{')?;
        let mut entries = IndexMap::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Dict(entries));
            }
            let start = self.pos;
            let key = match self.peek() {
                Some(b'"') => self.quoted()?,
                _ => self.bare()?,
            };
            let key_comment = self.skip_trivia()?;
            self.expect(b'=')?;
            self.skip_trivia()?;
            let mut node = self.value()?;
            node.comment = self.skip_trivia()?;
            self.expect(b';')?;
            entries.insert(
                key,
                Entry {
                    key_comment,
                    node,
                    extent: start..self.pos,
                },
            );
        }
    }

    fn array(&mut self) -> Result<Value, PbxprojError> {
        self.expect(b'(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b')') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            let start = self.pos;
            let mut node = self.value()?;
            node.comment = self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {}
                _ => return Err(self.error("expected ',' or ')'")),
            }
            items.push(Item {
                node,
                extent: start..self.pos,
            });
        }
    }

    fn quoted(&mut self) -> Result<String, PbxprojError> {
        self.expect(b'"')?;
        let text = self.text;
        let mut out = String::new();
        let mut chars = text[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                other => out.push(other),
            }
        }
        Err(self.error("unterminated string"))
    }

    fn bare(&mut self) -> Result<String, PbxprojError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            let ends = b.is_ascii_whitespace()
                || matches!(b, b'{' | b'}' | b'(' | b')' | b'=' | b';' | b',' | b'"' | b'<')
                || self.starts_with(b"/*")
                || self.starts_with(b"//");
            if ends {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a value"));
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn data(&mut self) -> Result<Value, PbxprojError> {
        let start = self.pos;
        let len = self.text[start..]
            .find('>')
            .ok_or_else(|| self.error("unterminated data"))?;
        self.pos = start + len + 1;
        Ok(Value::Data(self.text[start..self.pos].to_string()))
    }
}
