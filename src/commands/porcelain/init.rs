use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::Error;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        let repository_path = self.repository_path();
        if repository_path.is_dir() {
            return Err(Error::precondition_failed(format!(
                "twig repository already exists in {}",
                repository_path.display()
            ))
            .into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .twig/refs/tags directory")?;

        self.refs()
            .set_head(&BranchName::try_parse(DEFAULT_BRANCH)?)
            .context("Failed to create initial HEAD reference")?;

        self.index()
            .save(&[])
            .context("Failed to create .twig/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            repository_path.display()
        )?;

        Ok(())
    }
}
