use crate::areas::commit_graph::CommitGraph;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository marker directory at the working-tree root
pub const REPOSITORY_DIR: &str = ".twig";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository whose working tree is rooted at `path`, creating `path` if needed
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("unable to create directory {}", path.display()))?;
        }
        let path = path.canonicalize()?;
        let repository_path = path.join(REPOSITORY_DIR);

        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let index = Index::new(repository_path.join("index").into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            index,
            refs,
            workspace,
        })
    }

    /// Open the nearest repository at or above `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;
        let root = start
            .ancestors()
            .find(|dir| dir.join(REPOSITORY_DIR).is_dir())
            .ok_or_else(|| {
                Error::not_found(format!(
                    "not a twig repository (or any parent up to /): {}",
                    start.display()
                ))
            })?;

        Self::new(root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> std::path::PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn commit_graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database, &self.index, &self.refs)
    }

    /// Resolve `HEAD`, a branch name, or a full/abbreviated hash to a stored object
    pub fn resolve_revision(&self, revision: &str) -> Result<ObjectId> {
        if revision == HEAD_REF_NAME {
            return self
                .refs
                .current_commit()?
                .ok_or_else(|| Error::not_found("HEAD does not point at a commit yet"));
        }

        if let Ok(branch) = BranchName::try_parse(revision)
            && self.refs.branch_exists(&branch)
        {
            return self
                .refs
                .read_branch(&branch)?
                .ok_or_else(|| Error::not_found(format!("branch '{branch}' has no commits yet")));
        }

        self.database.resolve(revision)
    }

    /// Stage `content` for `path`
    ///
    /// The blob is stored before the index references it. Staging content identical to what is
    /// already staged fails with [`Error::PreconditionFailed`] and leaves the index untouched.
    /// A path the index cannot represent is [`Error::InvalidState`] and nothing is written.
    pub fn stage(&self, path: &str, content: &[u8]) -> Result<ObjectId> {
        IndexEntry::validate_path(path)?;

        self.index.update(|entries| {
            if !Index::is_modified_in(entries, path, content) {
                return Err(Error::precondition_failed(format!(
                    "'{path}' is already staged"
                )));
            }

            let oid = self.database.put(content)?;
            *entries = Index::upsert(std::mem::take(entries), path, oid.clone());

            Ok(oid)
        })
    }
}
