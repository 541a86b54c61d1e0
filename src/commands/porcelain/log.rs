use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
    pub abbrev_commit: bool,
}

impl Repository {
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        let mut first = true;

        for record in self.commit_graph().log()? {
            let (oid, commit) = record?;

            if opts.oneline {
                self.show_commit_oneline(&oid, &commit)?;
                continue;
            }

            if !first {
                writeln!(self.writer())?;
            }
            first = false;
            self.show_commit_medium(&oid, &commit, opts.abbrev_commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        oid: &ObjectId,
        commit: &Commit,
        abbrev_commit: bool,
    ) -> anyhow::Result<()> {
        let oid = if abbrev_commit {
            oid.to_short_oid()
        } else {
            oid.to_string()
        };

        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().rfc3339_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
