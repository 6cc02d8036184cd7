//! Content sources - where the loader gets its markdown files from

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentError;

/// A flat directory of named text files.
///
/// The loader only ever asks for the names directly under the root and for the
/// contents of one name at a time, so anything that can answer those two
/// questions can stand in for the filesystem.
pub trait ContentSource: Send + Sync {
    /// Names of the files directly under the root.
    ///
    /// An absent root is not an error: it simply has no entries.
    fn entries(&self) -> Result<Vec<String>, ContentError>;

    /// Read one file by name.
    fn read(&self, name: &str) -> Result<String, ContentError>;
}

/// Reads posts from a directory on disk
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for FsSource {
    fn entries(&self) -> Result<Vec<String>, ContentError> {
        if !self.root.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.root, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            // Non UTF-8 names cannot become slugs
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String, ContentError> {
        fs::read_to_string(self.root.join(name)).map_err(|e| ContentError::io(name, e))
    }
}

/// In-memory content, keyed by file name. Entries are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: IndexMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }
}

impl ContentSource for MemorySource {
    fn entries(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<String, ContentError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(name.to_string()))
    }
}
