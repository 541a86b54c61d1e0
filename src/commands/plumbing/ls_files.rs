use crate::areas::repository::Repository;

impl Repository {
    pub fn ls_files(&self, stage: bool) -> anyhow::Result<()> {
        for entry in self.index().load()? {
            if stage {
                writeln!(self.writer(), "{}", entry.to_line())?;
            } else {
                writeln!(self.writer(), "{}", entry.path)?;
            }
        }

        Ok(())
    }
}
