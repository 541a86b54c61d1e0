use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// List a tree, or the tree of a commit when given one
    pub fn ls_tree(&self, revision: &str) -> anyhow::Result<()> {
        let object_id = self.resolve_revision(revision)?;
        let content = self.database().get(&object_id)?;

        let tree = match Commit::parse(&content) {
            Ok(commit) => self.commit_graph().read_tree(commit.tree_oid())?,
            Err(_) => Tree::parse(&content)
                .map_err(|e| anyhow::anyhow!("{object_id} is neither a tree nor a commit: {e}"))?,
        };

        for entry in tree.entries() {
            writeln!(self.writer(), "{} blob {}\t{}", entry.mode, entry.oid, entry.path)?;
        }

        Ok(())
    }
}
