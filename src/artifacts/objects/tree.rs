//! Tree object
//!
//! A tree is a flat snapshot of the staging index at commit time. Entries keep index insertion
//! order (not lexicographic order), one per line, with no trailing newline:
//!
//! ```text
//! 100644 aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d README.md
//! 100644 3b18e512dba79e4c8300dd08aeb37f8e728b8dad src/lib.rs
//! ```

use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{Error, Result};
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<IndexEntry>,
}

impl Tree {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn serialize(&self) -> Bytes {
        self.entries
            .iter()
            .map(IndexEntry::to_line)
            .collect::<Vec<_>>()
            .join("\n")
            .into()
    }

    pub fn parse(content: &[u8]) -> Result<Self> {
        let content = std::str::from_utf8(content)
            .map_err(|e| Error::corrupt_object(format!("tree is not valid UTF-8: {e}")))?;

        let entries = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(IndexEntry::parse_line)
            .collect::<Result<Vec<_>>>()?;

        Ok(Tree { entries })
    }
}
