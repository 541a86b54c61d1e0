//! Object store
//!
//! Persists immutable, content-addressed objects under `objects/<2-hex>/<38-hex>`. Each object
//! is written at most once: storing content whose hash already exists is a no-op.

use crate::artifacts::codec;
use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const TEMP_OBJECT_PREFIX: &str = "tmp-obj-";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Store `content`, returning its hash whether or not it was already present.
    pub fn put(&self, content: &[u8]) -> Result<ObjectId> {
        let object_id = codec::digest(content);
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, content)?;
        debug!(oid = %object_id, size = content.len(), "stored object");

        Ok(object_id)
    }

    /// Load the original bytes of an object.
    pub fn get(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        let object_content = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(format!("object {object_id}")));
            }
            Err(e) => return Err(e.into()),
        };

        codec::decompress(&object_content)
            .map_err(|e| Error::corrupt_object(format!("object {object_id}: {e}")))
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    fn write_object(&self, object_path: &Path, content: &[u8]) -> Result<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            Error::invalid_state(format!("invalid object path {}", object_path.display()))
        })?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let object_content = codec::compress(content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(&object_content)?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("{TEMP_OBJECT_PREFIX}{}", rand::random::<u32>())
    }

    /// Find all objects whose hash starts with the given prefix.
    ///
    /// Used to resolve abbreviated hashes. Prefixes of two or more characters only scan their
    /// shard directory; shorter prefixes scan every shard.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let shards = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        let mut matches = Vec::new();
        for shard in shards {
            let shard_path = self.path.join(&shard);
            if !shard_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&shard_path)? {
                let file_name = entry?.file_name();
                let full_oid = format!("{shard}{}", file_name.to_string_lossy());

                if full_oid.len() == OBJECT_ID_LENGTH
                    && full_oid.starts_with(prefix)
                    && let Ok(oid) = ObjectId::try_parse(&full_oid)
                {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }

    /// Resolve a full or abbreviated hash to exactly one stored object.
    pub fn resolve(&self, revision: &str) -> Result<ObjectId> {
        if let Ok(oid) = ObjectId::try_parse(revision) {
            return if self.contains(&oid) {
                Ok(oid)
            } else {
                Err(Error::not_found(format!("object {oid}")))
            };
        }

        if revision.len() < MIN_PREFIX_LENGTH {
            return Err(Error::invalid_state(format!(
                "short object id {revision:?} must be at least {MIN_PREFIX_LENGTH} characters"
            )));
        }

        match self.find_by_prefix(revision)?.as_slice() {
            [] => Err(Error::not_found(format!("object {revision}"))),
            [oid] => Ok(oid.clone()),
            candidates => Err(Error::invalid_state(format!(
                "short object id {revision} is ambiguous ({} candidates)",
                candidates.len()
            ))),
        }
    }
}
