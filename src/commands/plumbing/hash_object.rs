use crate::areas::repository::Repository;
use crate::artifacts::codec;
use anyhow::Context;

impl Repository {
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let content = std::fs::read(object_path)
            .with_context(|| format!("could not open '{object_path}' for reading"))?;

        let object_id = if write {
            self.database().put(&content)?
        } else {
            codec::digest(&content)
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
