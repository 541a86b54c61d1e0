//! Staging index
//!
//! The index is the ordered set of `(path -> mode, hash)` records that will become the next
//! commit's tree. It is keyed by path (at most one entry per path) and keeps insertion order:
//! updating a path keeps its position, a new path is appended.
//!
//! ## Index File Format
//!
//! The file holds the zlib-compressed text `"<mode> <hash> <path>\n"` per entry. A missing or
//! empty file is an empty index. Lines that do not have exactly three fields are corruption
//! and fail the load; they are never skipped.
//!
//! ## Locking
//!
//! [`Index::update`] holds an exclusive lock on `index.lock` across load, mutation and save, so
//! concurrent stagers cannot lose each other's updates. [`Index::save`] replaces the file by
//! writing a temporary sibling and renaming it into place.

use crate::artifacts::codec;
use crate::artifacts::core::lock::with_lock;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use fake::rand;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted entries in their stored order
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        let compressed = match std::fs::read(self.path()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if compressed.is_empty() {
            return Ok(Vec::new());
        }

        let content = codec::decompress(&compressed)
            .map_err(|e| Error::corrupt_object(format!("index: {e}")))?;
        let content = std::str::from_utf8(&content)
            .map_err(|e| Error::corrupt_object(format!("index is not valid UTF-8: {e}")))?;

        let entries = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(IndexEntry::parse_line)
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = entries.iter().find(|entry| !seen.insert(&entry.path)) {
            return Err(Error::corrupt_object(format!(
                "index lists {} more than once",
                duplicate.path
            )));
        }

        Ok(entries)
    }

    /// Record `oid` for `path`, updating in place or appending with the default mode.
    ///
    /// Existing entries are never reordered; upserting an unchanged hash is a no-op.
    pub fn upsert(mut entries: Vec<IndexEntry>, path: &str, oid: ObjectId) -> Vec<IndexEntry> {
        match entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => {
                if entry.oid != oid {
                    entry.oid = oid;
                }
            }
            None => entries.push(IndexEntry::with_default_mode(path, oid)),
        }

        entries
    }

    /// Overwrite the index file with `entries`, in order
    pub fn save(&self, entries: &[IndexEntry]) -> Result<()> {
        for entry in entries {
            IndexEntry::validate_path(&entry.path)?;
        }

        let content = entries
            .iter()
            .map(|entry| format!("{}\n", entry.to_line()))
            .collect::<String>();
        let compressed = codec::compress(content.as_bytes())?;

        let parent = self.path.parent().ok_or_else(|| {
            Error::invalid_state(format!("invalid index path {}", self.path.display()))
        })?;
        let temp_path = parent.join(format!("index.tmp-{}", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        file.write_all(&compressed)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, self.path())?;

        debug!(entries = entries.len(), "index saved");

        Ok(())
    }

    /// Whether `content` differs from what is staged for `path` (or `path` is not staged)
    pub fn is_modified(&self, path: &str, content: &[u8]) -> Result<bool> {
        Ok(Self::is_modified_in(&self.load()?, path, content))
    }

    pub fn is_modified_in(entries: &[IndexEntry], path: &str, content: &[u8]) -> bool {
        Self::entry_by_path(entries, path)
            .is_none_or(|entry| entry.oid != codec::digest(content))
    }

    pub fn entry_by_path<'e>(entries: &'e [IndexEntry], path: &str) -> Option<&'e IndexEntry> {
        entries.iter().find(|entry| entry.path == path)
    }

    /// Load, mutate and save under the index lock.
    ///
    /// If `f` fails nothing is written.
    pub fn update<T>(&self, f: impl FnOnce(&mut Vec<IndexEntry>) -> Result<T>) -> Result<T> {
        with_lock(self.path(), || {
            let mut entries = self.load()?;
            let outcome = f(&mut entries)?;
            self.save(&entries)?;

            Ok(outcome)
        })
    }
}
