use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;

#[derive(Debug, Clone)]
pub enum BranchAction {
    List,
    Create(String),
    Delete(String),
}

impl Repository {
    pub fn branch(&self, action: &BranchAction) -> anyhow::Result<()> {
        match action {
            BranchAction::List => self.list_branches(),
            BranchAction::Create(name) => self.create_branch(name),
            BranchAction::Delete(name) => self.delete_branch(name),
        }
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let current = self.refs().current_branch().ok();

        for branch in self.refs().list_branches()? {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }

    fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name)?;
        let tip = self.refs().create_branch(&branch)?;

        match tip {
            Some(oid) => writeln!(
                self.writer(),
                "Created branch {branch} at {}",
                oid.to_short_oid()
            )?,
            None => writeln!(self.writer(), "Created branch {branch} (no commits yet)")?,
        }

        Ok(())
    }

    fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name)?;
        let tip = self.refs().delete_branch(&branch)?;

        match tip {
            Some(oid) => writeln!(
                self.writer(),
                "Deleted branch {branch} (was {}).",
                oid.to_short_oid()
            )?,
            None => writeln!(self.writer(), "Deleted branch {branch}.")?,
        }

        Ok(())
    }
}
