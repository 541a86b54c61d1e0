use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use bytes::Bytes;
use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

/// Working tree rooted at the repository root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expand `target` into the files it names, as repository-relative `/`-separated paths
    ///
    /// Directories are walked recursively; the repository marker directory is never listed.
    pub fn list_files(&self, target: &Path) -> anyhow::Result<Vec<String>> {
        let target = std::fs::canonicalize(target)
            .with_context(|| format!("pathspec '{}' did not match any files", target.display()))?;

        if !target.starts_with(&self.path) {
            anyhow::bail!(
                "'{}' is outside repository at '{}'",
                target.display(),
                self.path.display()
            );
        }

        let files = if target.is_dir() {
            WalkDir::new(&target)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.file_name() != OsStr::new(REPOSITORY_DIR))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .collect::<Vec<_>>()
        } else {
            vec![target]
        };

        files
            .iter()
            .filter(|file| !Self::is_ignored(self.relative(file)))
            .map(|file| Self::to_index_path(self.relative(file)))
            .collect()
    }

    pub fn read_file(&self, relative_path: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(relative_path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .with_context(|| format!("unable to read '{}'", file_path.display()))
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.path).unwrap_or(path)
    }

    fn is_ignored(relative_path: &Path) -> bool {
        relative_path
            .components()
            .any(|component| component.as_os_str() == OsStr::new(REPOSITORY_DIR))
    }

    fn to_index_path(relative_path: &Path) -> anyhow::Result<String> {
        let path = relative_path
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .with_context(|| format!("path is not valid UTF-8: {}", relative_path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .join("/");

        if path.is_empty() {
            anyhow::bail!("'{}' is not a file", relative_path.display());
        }
        IndexEntry::validate_path(&path)?;

        Ok(path)
    }
}
