//! Three-way status scan
//!
//! Reconciles three flat `(path -> state)` mappings without mutating any of
//! them: the last commit's tree (flattened through the object store), the
//! staging index, and the live working tree. Correctness hinges on all three
//! sources using the same repository-relative, '/'-separated path form.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::FileStat;
use crate::artifacts::status::file_change::{
    FileCategory, FileChange, IndexChangeType, WorkspaceChangeType,
};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;
pub type HeadTree = BTreeMap<PathBuf, DatabaseEntry>;

/// Result of one status scan
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    /// Paths known to neither the index nor the last commit
    pub untracked: FileSet,
    /// Two-column change state per path (staged column, unstaged column)
    pub changed: BTreeMap<PathBuf, FileChange>,
    /// False while the current branch has no commits
    pub has_commits: bool,
}

impl StatusReport {
    /// Assign every reported path to exactly one category
    pub fn partition(&self) -> BTreeMap<PathBuf, FileCategory> {
        let mut buckets = BTreeMap::new();

        for path in &self.untracked {
            buckets.insert(path.clone(), FileCategory::Untracked);
        }
        for (path, change) in &self.changed {
            if let Some(category) = FileCategory::from_change(change) {
                buckets.insert(path.clone(), category);
            }
        }

        buckets
    }

    pub fn is_clean(&self) -> bool {
        self.untracked.is_empty() && self.changed.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    /// Run the scan, optionally restricted to paths under `filter`
    pub async fn compute(
        &self,
        index: &Index,
        filter: Option<&Path>,
    ) -> anyhow::Result<StatusReport> {
        let inspector = Inspector::new(self.repository);

        let workspace_stats = self.scan_workspace(filter)?;
        let head_tree = self.load_head_tree().await?;
        let has_commits = self.repository.refs().read_head()?.is_some();

        let mut report = StatusReport {
            has_commits,
            ..Default::default()
        };

        // untracked: on disk, in neither the index nor the last commit
        for path in workspace_stats.keys() {
            if index.entry_by_path(path).is_none() && !head_tree.contains_key(path) {
                report.untracked.insert(path.clone());
            }
        }

        for entry in index.entries() {
            if !Self::matches_filter(&entry.path, filter) {
                continue;
            }

            let workspace_change = inspector
                .check_index_against_workspace(entry, workspace_stats.get(&entry.path))?;
            let index_change =
                inspector.check_index_against_head_tree(entry, head_tree.get(&entry.path));

            if workspace_change != WorkspaceChangeType::None {
                report
                    .changed
                    .entry(entry.path.clone())
                    .or_default()
                    .workspace_change = workspace_change;
            }
            if index_change != IndexChangeType::None {
                report
                    .changed
                    .entry(entry.path.clone())
                    .or_default()
                    .index_change = index_change;
            }
        }

        // last-commit paths no longer staged
        for path in head_tree.keys() {
            if Self::matches_filter(path, filter) && index.entry_by_path(path).is_none() {
                report.changed.entry(path.clone()).or_default().index_change =
                    IndexChangeType::Deleted;
            }
        }

        Ok(report)
    }

    /// Stat every regular file under the filter, skipping entries that
    /// disappear or become unreadable mid-walk
    fn scan_workspace(&self, filter: Option<&Path>) -> anyhow::Result<BTreeMap<PathBuf, FileStat>> {
        let workspace = self.repository.workspace();
        let mut stats = BTreeMap::new();

        let files = match filter {
            Some(path) if !self.repository.path().join(path).exists() => Vec::new(),
            other => workspace.list_files(other)?,
        };

        for path in files {
            match workspace.stat_file(&path) {
                Ok(stat) => {
                    stats.insert(path, stat);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable entry");
                }
            }
        }

        Ok(stats)
    }

    async fn load_head_tree(&self) -> anyhow::Result<HeadTree> {
        let mut head_tree = HeadTree::new();

        if let Some(head_oid) = self.repository.refs().read_head()? {
            let commit = self.repository.database().parse_commit(&head_oid)?;
            self.repository
                .database()
                .flatten_tree(commit.tree_oid(), Path::new(""), &mut head_tree)?;
        }

        Ok(head_tree)
    }

    fn matches_filter(path: &Path, filter: Option<&Path>) -> bool {
        match filter {
            Some(prefix) => path.starts_with(prefix),
            None => true,
        }
    }
}
