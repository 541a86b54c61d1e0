//! References (HEAD and branches)
//!
//! `HEAD` is always symbolic in this design: it holds `ref: refs/heads/<branch>\n` naming the
//! current branch. A branch file under `refs/heads/` holds the 40-hex hash of the branch tip,
//! or is empty/absent while the branch has no commits.
//!
//! ## Locking
//!
//! Writes to a branch file happen under an exclusive lock on its `<branch>.lock` sidecar.
//! Lock sidecars are never reported as branches.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::lock::{LOCK_SUFFIX, with_lock};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Regex pattern for parsing the symbolic HEAD
const SYMREF_REGEX: &str = r"^ref: (refs/heads/\S+)\n?$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository marker directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }

    fn branch_path(&self, branch: &BranchName) -> PathBuf {
        self.path.join(branch.to_ref_path())
    }

    /// Point HEAD at `branch`
    pub fn set_head(&self, branch: &BranchName) -> Result<()> {
        with_lock(&self.head_path(), || {
            write_ref_file(&self.head_path(), &format!("ref: {}\n", branch.to_ref_path()))
        })
    }

    /// Name of the branch HEAD points at
    pub fn current_branch(&self) -> Result<BranchName> {
        let content = match std::fs::read_to_string(self.head_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(HEAD_REF_NAME));
            }
            Err(e) => return Err(e.into()),
        };

        let re = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| Error::invalid_state(format!("invalid symref regex {SYMREF_REGEX}: {e}")))?;
        let captures = re.captures(&content).ok_or_else(|| {
            Error::invalid_state(format!("HEAD is not a symbolic branch ref: {content:?}"))
        })?;

        BranchName::try_parse_ref_path(&captures[1])
    }

    /// Tip of the current branch; `None` while the branch has no commits
    pub fn current_commit(&self) -> Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    /// Tip of `branch`; `None` if the branch file is absent or empty
    pub fn read_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let content = match std::fs::read_to_string(self.branch_path(branch)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(&content)
            .map(Some)
            .map_err(|e| Error::invalid_state(format!("branch {branch} holds a malformed hash: {e}")))
    }

    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.branch_path(branch).is_file()
    }

    /// Overwrite the tip of `branch` with `oid`, creating the branch file if absent
    pub fn advance(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        let branch_path = self.branch_path(branch);

        with_lock(&branch_path, || write_ref_file(&branch_path, oid.as_ref()))?;
        debug!(%branch, %oid, "branch advanced");

        Ok(())
    }

    /// Advance `branch` to `oid` only if its tip is still `expected`
    ///
    /// Fails with [`Error::InvalidState`] and writes nothing if another writer moved the branch
    /// in the meantime.
    pub fn advance_from(
        &self,
        branch: &BranchName,
        expected: Option<&ObjectId>,
        oid: &ObjectId,
    ) -> Result<()> {
        let branch_path = self.branch_path(branch);

        with_lock(&branch_path, || {
            let current = self.read_branch(branch)?;
            if current.as_ref() != expected {
                return Err(Error::invalid_state(format!(
                    "branch {branch} moved from {} to {} during the update",
                    display_tip(expected),
                    display_tip(current.as_ref())
                )));
            }

            write_ref_file(&branch_path, oid.as_ref())
        })?;
        debug!(%branch, %oid, "branch advanced");

        Ok(())
    }

    /// Create `branch` at the current commit (empty if there is none yet)
    pub fn create_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch);
        let source = self.current_commit()?;

        with_lock(&branch_path, || {
            if branch_path.exists() {
                return Err(Error::precondition_failed(format!(
                    "a branch named '{branch}' already exists"
                )));
            }

            write_ref_file(&branch_path, source.as_ref().map_or("", |oid| oid.as_ref()))
        })?;
        info!(%branch, tip = %display_tip(source.as_ref()), "branch created");

        Ok(source)
    }

    /// Remove `branch`, returning the tip it pointed at
    pub fn delete_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch);

        if !branch_path.is_file() {
            return Err(Error::not_found(format!("branch '{branch}'")));
        }

        if self.current_branch().ok().as_ref() == Some(branch) {
            return Err(Error::precondition_failed(format!(
                "cannot delete branch '{branch}' which is currently checked out"
            )));
        }

        let tip = with_lock(&branch_path, || {
            let tip = self.read_branch(branch)?;
            std::fs::remove_file(&branch_path)?;
            Ok(tip)
        })?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        info!(%branch, "branch deleted");

        Ok(tip)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::from(std::io::Error::other(e.to_string())))?;
            let file_name = entry.file_name().to_string_lossy();
            if !entry.file_type().is_file() || file_name.ends_with(LOCK_SUFFIX) {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(&heads_path) else {
                continue;
            };
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if let Ok(branch) = BranchName::try_parse(&name) {
                branches.push(branch);
            }
        }
        branches.sort();

        Ok(branches)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path()
            && parent.read_dir()?.all(|entry| {
                entry.is_ok_and(|entry| entry.file_name().to_string_lossy().ends_with(LOCK_SUFFIX))
            })
        {
            std::fs::remove_dir_all(parent)?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}

fn write_ref_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut ref_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    ref_file.write_all(content.as_bytes())?;

    Ok(())
}

fn display_tip(oid: Option<&ObjectId>) -> String {
    oid.map_or_else(|| "(no commits)".to_string(), ToString::to_string)
}
