//! Ignore patterns value object
//!
//! Decides which loaded files are platform junk and never linked. Built-in
//! names (`.DS_Store`, `Thumbs.db`) are always ignored; projects can add
//! gitignore-style patterns through the `ignore` config key.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names that are never linked
pub const BUILTIN_IGNORES: [&str; 2] = [".DS_Store", "Thumbs.db"];

/// Maximum number of user patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Compiled ignore matcher over root-relative asset paths
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IgnorePatterns {
    /// Only the built-in junk file names.
    pub fn builtin() -> Self {
        Self::with_patterns(&[]).expect("built-in ignore patterns always compile")
    }

    /// Built-in names plus user patterns.
    pub fn with_patterns(patterns: &[String]) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new("");
        for name in BUILTIN_IGNORES {
            builder
                .add_line(None, name)
                .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;
        }

        let mut pattern_count = 0;
        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            builder
                .add_line(None, trimmed)
                .map_err(|e| IgnoreError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if an asset path should be ignored.
    ///
    /// Relative paths are matched as-is; absolute paths only by file name.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let candidate: PathBuf = if path.has_root() {
            match path.file_name() {
                Some(name) => PathBuf::from(name),
                None => return false,
            }
        } else {
            path.to_path_buf()
        };
        self.matcher
            .matched_path_or_any_parents(&candidate, false)
            .is_ignore()
    }

    /// Number of user patterns (built-ins excluded).
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

/// Errors that can occur when compiling ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    /// Too many patterns configured.
    #[error("{count} ignore patterns configured, exceeds {limit} limit")]
    TooManyPatterns { count: usize, limit: usize },
    /// A pattern has invalid syntax.
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// Failed to build the gitignore matcher.
    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),
}
