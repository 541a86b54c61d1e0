//! Backward walk over the parent chain
//!
//! History is linear: each commit has at most one parent. The walk is lazy, yielding one
//! parsed commit per step, and ends at the first commit without a parent. A commit seen twice
//! means the chain loops back on itself; that is reported once as corruption and the walk
//! stops.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::collections::HashSet;
use tracing::warn;

pub struct History<'d> {
    database: &'d Database,
    next: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'d> History<'d> {
    /// Start walking from `start`; `None` yields an empty history.
    pub fn new(database: &'d Database, start: Option<ObjectId>) -> Self {
        History {
            database,
            next: start,
            visited: HashSet::new(),
        }
    }

    fn step(&mut self, oid: ObjectId) -> Result<(ObjectId, Commit)> {
        if !self.visited.insert(oid.clone()) {
            warn!(commit = %oid, "parent chain revisits a commit");
            return Err(Error::corrupt_object(format!(
                "commit history contains a cycle at {oid}"
            )));
        }

        let commit = Commit::parse(&self.database.get(&oid)?)?;
        self.next = commit.parent().cloned();

        Ok((oid, commit))
    }
}

impl Iterator for History<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        Some(self.step(oid))
    }
}
