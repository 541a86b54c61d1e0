//! Data structures and codecs
//!
//! - `branch`: Branch name validation
//! - `codec`: Content hashing and compression
//! - `core`: Shared utilities (scoped file locking)
//! - `index`: Staging index records
//! - `log`: Commit history traversal
//! - `objects`: Object types (tree, commit) and identifiers

pub mod branch;
pub mod codec;
pub mod core;
pub mod index;
pub mod log;
pub mod objects;
