//! Staging index records
//!
//! The index file holds the zlib-compressed text of all entries, one per line, in insertion
//! order:
//!
//! ```text
//! 100644 aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d README.md
//! 100644 3b18e512dba79e4c8300dd08aeb37f8e728b8dad src/lib.rs
//! ```

pub mod index_entry;

/// Mode recorded for newly staged paths
pub const DEFAULT_MODE: &str = "100644";
