use crate::areas::commit_graph::CommitOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Commit the index, taking the author from `identity` or the environment
    ///
    /// The author is only resolved once there is something to commit.
    pub fn commit(&self, message: &str, identity: Option<&str>) -> anyhow::Result<ObjectId> {
        let branch = self.refs().current_branch()?;
        self.commit_graph().check_committable(message)?;

        let author = match identity {
            Some(identity) => Author::from_identity(identity)?,
            None => Author::load_from_env()?,
        };
        let options = CommitOptions::new(message.to_string(), author);

        let commit_oid = self.commit_graph().commit(&options)?;
        let commit = self.commit_graph().read_commit(&commit_oid)?;

        let is_root = match commit.parent() {
            Some(_) => "",
            None => " (root-commit)",
        };

        writeln!(
            self.writer(),
            "[{branch}{is_root} {}] {}",
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_oid)
    }
}
