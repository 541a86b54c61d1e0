use crate::areas::repository::Repository;
use std::path::Path;
use tracing::warn;

impl Repository {
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        // Expand every argument up front so a bad pathspec stages nothing
        let paths = paths
            .iter()
            .map(|path| self.workspace().list_files(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let content = self.workspace().read_file(&path)?;

            match self.stage(&path, &content) {
                Ok(oid) => writeln!(self.writer(), "Stored object as: {oid} {path}")?,
                Err(e) if e.is_precondition() => {
                    warn!(%path, "skipped unchanged file");
                    writeln!(self.writer(), "{e}")?
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }
}
