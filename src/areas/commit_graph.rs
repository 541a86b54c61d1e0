//! Commit graph
//!
//! Turns the staging index into tree and commit objects, advances the current branch, and walks
//! history backwards through parent links.
//!
//! Commit order of writes: tree object, commit object, branch ref. A failure after the object
//! writes leaves unreferenced but harmless objects behind.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::log::history::History;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use derive_new::new;
use tracing::info;

/// Everything a commit needs from the caller
#[derive(Debug, Clone, new)]
pub struct CommitOptions {
    pub message: String,
    pub author: Author,
}

#[derive(Debug, new)]
pub struct CommitGraph<'r> {
    database: &'r Database,
    index: &'r Index,
    refs: &'r Refs,
}

impl<'r> CommitGraph<'r> {
    /// Serialize `entries` as a tree object and store it
    pub fn build_tree(&self, entries: &[IndexEntry]) -> Result<ObjectId> {
        let tree = Tree::new(entries.to_vec());

        self.database.put(&tree.serialize())
    }

    /// Staged entries a commit with `message` would record
    ///
    /// Fails with [`Error::PreconditionFailed`] if the message is blank or the index is empty.
    pub fn check_committable(&self, message: &str) -> Result<Vec<IndexEntry>> {
        if message.trim().is_empty() {
            return Err(Error::precondition_failed("aborting commit due to empty commit message"));
        }

        let entries = self.index.load()?;
        if entries.is_empty() {
            return Err(Error::precondition_failed("nothing to commit"));
        }

        Ok(entries)
    }

    /// Record the staged snapshot on the current branch
    ///
    /// Writes nothing if [`CommitGraph::check_committable`] refuses or if the author would not
    /// survive serialization ([`Error::InvalidState`]).
    pub fn commit(&self, options: &CommitOptions) -> Result<ObjectId> {
        let entries = self.check_committable(&options.message)?;
        options.author.validate()?;

        let branch = self.refs.current_branch()?;
        let parent = self.refs.read_branch(&branch)?;

        let tree_oid = self.build_tree(&entries)?;
        let commit = Commit::new(
            parent.clone(),
            tree_oid,
            options.author.clone(),
            &options.message,
        );
        let commit_oid = self.database.put(&commit.serialize())?;

        self.refs.advance_from(&branch, parent.as_ref(), &commit_oid)?;
        info!(%branch, commit = %commit_oid, root = parent.is_none(), "committed");

        Ok(commit_oid)
    }

    pub fn parse(content: &[u8]) -> Result<Commit> {
        Commit::parse(content)
    }

    pub fn read_commit(&self, oid: &ObjectId) -> Result<Commit> {
        Self::parse(&self.database.get(oid)?)
    }

    pub fn read_tree(&self, oid: &ObjectId) -> Result<Tree> {
        Tree::parse(&self.database.get(oid)?)
    }

    /// History of the current branch, newest first
    pub fn log(&self) -> Result<History<'r>> {
        Ok(self.log_from(self.refs.current_commit()?))
    }

    pub fn log_from(&self, start: Option<ObjectId>) -> History<'r> {
        History::new(self.database, start)
    }
}
