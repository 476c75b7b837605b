use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tree::TreeNode;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Snapshot the staging index as a new commit on the current branch
    ///
    /// Order matters for crash safety: every object is stored before the
    /// branch ref moves, and the ref move is the single durable mutation that
    /// makes the commit reachable. A failure anywhere earlier leaves at worst
    /// orphaned objects behind.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            return Err(RepositoryError::EmptyIndex.into());
        }

        let entries = index.entries().cloned().collect::<Vec<_>>();
        let root = TreeNode::build(&entries)?;
        let tree_id = root.to_tree()?.object_id()?;

        let parent = self.refs().read_head()?;

        // identical root tree means an identical snapshot
        if let Some(parent_oid) = &parent {
            let parent_commit = self.database().parse_commit(parent_oid)?;
            if parent_commit.tree_oid() == &tree_id {
                writeln!(self.writer(), "nothing to commit, working tree clean")?;
                return Ok(());
            }
        }

        let author = self
            .config()
            .author_identity()?
            .ok_or(RepositoryError::MissingAuthor)?;

        // the store walk must reproduce the hash the no-change guard computed
        let stored_tree_id = root.write_to(self.database())?;
        anyhow::ensure!(
            stored_tree_id == tree_id,
            "stored root tree {} diverged from computed hash {}",
            stored_tree_id,
            tree_id
        );

        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let commit = Commit::new(parent, stored_tree_id, author, message.trim().to_string());
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
