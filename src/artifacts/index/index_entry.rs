//! Index entry representation
//!
//! Each entry in the index maps a working-tree path to the hash of the content staged for it,
//! along with a permission mode string.
//!
//! ## Entry Format
//!
//! One entry per line, three single-space separated fields:
//!
//! ```text
//! <mode> <hash> <path>
//! ```

use crate::artifacts::index::DEFAULT_MODE;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;

/// Staged file record
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Permission mode string (e.g. `100644`)
    pub mode: String,
    /// Hash of the staged content
    pub oid: ObjectId,
    /// Path relative to the repository root, `/`-separated
    pub path: String,
}

impl IndexEntry {
    /// Create an entry with the default file mode
    pub fn with_default_mode(path: impl Into<String>, oid: ObjectId) -> Self {
        IndexEntry::new(DEFAULT_MODE.to_string(), oid, path.into())
    }

    /// Check that `path` fits in the path field of an entry line
    pub fn validate_path(path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(Error::invalid_state("cannot stage an empty path"));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(Error::invalid_state(format!(
                "cannot stage {path:?}: paths containing whitespace are not supported"
            )));
        }

        Ok(())
    }

    /// Render the entry as a single line (without the line terminator)
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.mode, self.oid, self.path)
    }

    /// Parse one line; anything other than exactly three whitespace-separated fields is corrupt.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields = line.split_whitespace().collect::<Vec<_>>();

        match fields.as_slice() {
            [mode, oid, path] => {
                let oid = ObjectId::try_parse(oid)
                    .map_err(|e| Error::corrupt_object(format!("invalid entry hash: {e}")))?;
                Ok(IndexEntry::new(mode.to_string(), oid, path.to_string()))
            }
            _ => Err(Error::corrupt_object(format!(
                "malformed entry line, expected 3 fields but found {}: {line:?}",
                fields.len()
            ))),
        }
    }
}
