use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, revision: &str) -> anyhow::Result<()> {
        let object_id = self.resolve_revision(revision)?;
        let content = self.database().get(&object_id)?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
