//! Staged native writes
//!
//! Native documents (project, plist, descriptors, sources) are read once,
//! edited in memory and written once at the end of a platform run. File
//! copies and removals are queued in order and flushed before the documents.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use similar::TextDiff;

use crate::domain::ports::{FileSystem, LinkEvent, LinkEventSink};
use crate::domain::value_objects::Platform;
use crate::error::{LinkError, LinkResult};

/// Queued asset file operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    Copy { from: PathBuf, to: PathBuf },
    Remove(PathBuf),
}

impl FileOperation {
    fn describe(&self, dry_run: bool) -> String {
        match (self, dry_run) {
            (FileOperation::Copy { from, to }, false) => {
                format!("Copied {} to {}", from.display(), to.display())
            }
            (FileOperation::Copy { from, to }, true) => {
                format!("Would copy {} to {}", from.display(), to.display())
            }
            (FileOperation::Remove(path), false) => format!("Removed {}", path.display()),
            (FileOperation::Remove(path), true) => format!("Would remove {}", path.display()),
        }
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(false))
    }
}

#[derive(Debug, Clone)]
struct StagedDocument {
    original: Option<String>,
    current: Option<String>,
}

impl StagedDocument {
    fn is_changed(&self) -> bool {
        self.original != self.current
    }
}

/// In-memory buffer of one platform run's writes
pub struct StagedWrites<'a> {
    fs: &'a dyn FileSystem,
    operations: Vec<FileOperation>,
    documents: IndexMap<PathBuf, StagedDocument>,
}

impl<'a> StagedWrites<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            operations: Vec::new(),
            documents: IndexMap::new(),
        }
    }

    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Queue a copy of an asset file
    pub fn copy(&mut self, from: &Path, to: PathBuf) {
        let op = FileOperation::Copy {
            from: from.to_path_buf(),
            to,
        };
        if self.operations.last() != Some(&op) {
            self.operations.push(op);
        }
    }

    /// Queue removal of a file that exists or is about to be copied
    pub fn remove(&mut self, path: PathBuf) {
        let pending = self
            .operations
            .iter()
            .any(|op| matches!(op, FileOperation::Copy { to, .. } if *to == path));
        if pending || self.fs.exists(&path) {
            self.operations.push(FileOperation::Remove(path));
        }
    }

    pub fn operations(&self) -> &[FileOperation] {
        &self.operations
    }

    /// Current content of a document, staged edits included. `None` when
    /// the document does not exist (or was deleted in this run).
    pub fn read(&mut self, path: &Path) -> LinkResult<Option<String>> {
        self.load(path)?;
        Ok(self
            .documents
            .get(path)
            .and_then(|doc| doc.current.clone()))
    }

    /// Replace the content of a document
    pub fn write(&mut self, path: &Path, content: String) -> LinkResult<()> {
        self.load(path)?;
        if let Some(doc) = self.documents.get_mut(path) {
            doc.current = Some(content);
        }
        Ok(())
    }

    /// Delete a document
    pub fn delete(&mut self, path: &Path) -> LinkResult<()> {
        self.load(path)?;
        if let Some(doc) = self.documents.get_mut(path) {
            doc.current = None;
        }
        Ok(())
    }

    /// Whether a document exists after staged edits, without reading it
    pub fn will_exist(&self, path: &Path) -> bool {
        match self.documents.get(path) {
            Some(doc) => doc.current.is_some(),
            None => self.fs.exists(path),
        }
    }

    /// Documents created in this run that sit directly in `dir`
    pub fn created_in(&self, dir: &Path) -> Vec<PathBuf> {
        self.documents
            .iter()
            .filter(|(path, doc)| {
                doc.original.is_none() && doc.current.is_some() && path.parent() == Some(dir)
            })
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Documents whose content differs from disk
    pub fn changed_documents(&self) -> Vec<&Path> {
        self.documents
            .iter()
            .filter(|(_, doc)| doc.is_changed())
            .map(|(path, _)| path.as_path())
            .collect()
    }

    fn load(&mut self, path: &Path) -> LinkResult<()> {
        if self.documents.contains_key(path) {
            return Ok(());
        }
        let original = if self.fs.exists(path) {
            Some(
                self.fs
                    .read(path)
                    .map_err(|e| LinkError::fs("read", path, e))?,
            )
        } else {
            None
        };
        self.documents.insert(
            path.to_path_buf(),
            StagedDocument {
                current: original.clone(),
                original,
            },
        );
        Ok(())
    }

    /// Apply queued operations, then write changed documents.
    ///
    /// On a dry run nothing touches the disk: operations are reported as
    /// detail lines and documents as unified diffs. Returns the documents
    /// written (or that would be written).
    pub fn flush(
        self,
        platform: Platform,
        sink: &dyn LinkEventSink,
        dry_run: bool,
    ) -> LinkResult<Vec<PathBuf>> {
        for op in &self.operations {
            if !dry_run {
                match op {
                    FileOperation::Copy { from, to } => self
                        .fs
                        .copy(from, to)
                        .map_err(|e| LinkError::fs("copy", from, e))?,
                    FileOperation::Remove(path) => self
                        .fs
                        .remove(path)
                        .map_err(|e| LinkError::fs("remove", path, e))?,
                }
            }
            sink.info(platform, op.describe(dry_run));
        }

        let mut written = Vec::new();
        for (path, doc) in &self.documents {
            if !doc.is_changed() {
                continue;
            }
            if dry_run {
                sink.on_event(LinkEvent::NativeFileDiff {
                    platform,
                    path: path.clone(),
                    diff: unified_diff(
                        path,
                        doc.original.as_deref().unwrap_or(""),
                        doc.current.as_deref().unwrap_or(""),
                    ),
                });
            } else {
                match &doc.current {
                    Some(content) => self
                        .fs
                        .write(path, content)
                        .map_err(|e| LinkError::fs("write", path, e))?,
                    None => self
                        .fs
                        .remove(path)
                        .map_err(|e| LinkError::fs("remove", path, e))?,
                }
                sink.on_event(LinkEvent::NativeFileWritten {
                    platform,
                    path: path.clone(),
                });
            }
            written.push(path.clone());
        }
        Ok(written)
    }
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(
            &format!("a/{}", path.display()),
            &format!("b/{}", path.display()),
        )
        .to_string()
}
