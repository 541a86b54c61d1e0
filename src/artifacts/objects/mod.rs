//! Object types
//!
//! Every object is an immutable byte sequence addressed by its SHA-1 hash:
//!
//! - **Blob**: raw file content, stored as-is
//! - **Tree**: the staging index serialized at commit time
//! - **Commit**: a tree, an optional parent, authorship, and a message
//!
//! No type tag is embedded in the stored bytes; the caller knows what kind it asked for.

pub mod commit;
pub mod object_id;
pub mod tree;

/// Length of a raw SHA-1 digest in bytes
pub const DIGEST_LENGTH: usize = 20;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving an abbreviated hash
pub const MIN_PREFIX_LENGTH: usize = 4;

/// Length of an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
