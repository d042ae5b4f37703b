//! Content Hash Value Object
//!
//! A validated, immutable hash representing the bytes of an asset file.
//! Used as the asset's identity for change detection in the manifest.

use std::fmt;
use std::io::Read;

use sha2::{Digest, Sha256};

const READ_CHUNK: usize = 64 * 1024;

/// Content hash value object
///
/// Wraps a SHA-256 hash string with the `sha256:` prefix. Hashes written by
/// the legacy tool are bare SHA-1 hex strings; they are kept as-is and simply
/// never match a freshly computed hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a stored hash string verbatim
    pub fn new(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// A hash that matches nothing, used to force a relink
    pub fn stale() -> Self {
        Self(String::new())
    }

    /// Compute SHA-256 of in-memory content
    pub fn from_bytes(content: &[u8]) -> Self {
        let hash = Sha256::digest(content);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Compute SHA-256 by streaming a reader
    ///
    /// The digest does not depend on how the reader chunks its output.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Self(format!("{}{:x}", Self::PREFIX, hasher.finalize())))
    }

    /// Get the full hash string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    pub fn is_stale(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
