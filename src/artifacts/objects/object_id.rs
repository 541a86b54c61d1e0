//! Object identifier (SHA-1 content hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They are both the identity of an
//! object and its storage address.
//!
//! ## Storage
//!
//! Objects are stored in `.twig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{DIGEST_LENGTH, OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use std::fmt::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// Validated 40-character lowercase hex object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID
    ///
    /// Surrounding whitespace is ignored so ids read straight from ref files parse cleanly.
    /// Anything other than exactly 40 lowercase hex characters is rejected.
    pub fn try_parse(id: &str) -> Result<Self> {
        let id = id.trim();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::invalid_state(format!(
                "invalid object id length {}: {id:?}",
                id.len()
            )));
        }
        if !id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(Error::invalid_state(format!(
                "invalid object id characters: {id:?}"
            )));
        }

        Ok(Self(id.to_string()))
    }

    /// Build an object ID from the raw 20-byte digest
    pub fn from_digest(digest: &[u8; DIGEST_LENGTH]) -> Self {
        let hex = digest
            .iter()
            .fold(String::with_capacity(OBJECT_ID_LENGTH), |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            });

        Self(hex)
    }

    /// Shard prefix (first two hex characters)
    pub fn shard(&self) -> &str {
        &self.0[..2]
    }

    /// Convert to the relative storage path `xx/yyyy...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OBJECT_ID_LENGTH].to_string()
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
