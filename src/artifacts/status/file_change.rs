use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// How a path in the working tree differs from its index entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkspaceChangeType {
    #[default]
    None,
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::None => " ",
            WorkspaceChangeType::Modified => "M",
            WorkspaceChangeType::Deleted => "D",
        }
    }
}

/// How an index entry differs from the last commit's tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IndexChangeType {
    #[default]
    None,
    Added,
    Modified,
    Deleted,
}

impl From<&IndexChangeType> for &str {
    fn from(change: &IndexChangeType) -> Self {
        match change {
            IndexChangeType::None => " ",
            IndexChangeType::Added => "A",
            IndexChangeType::Modified => "M",
            IndexChangeType::Deleted => "D",
        }
    }
}

/// Combined two-column change state of one path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileChange {
    pub index_change: IndexChangeType,
    pub workspace_change: WorkspaceChangeType,
}

impl From<&FileChange> for String {
    fn from(change: &FileChange) -> Self {
        let index_str: &str = (&change.index_change).into();
        let workspace_str: &str = (&change.workspace_change).into();
        format!("{}{}", index_str, workspace_str)
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change_str: String = self.into();
        write!(f, "{}", change_str)
    }
}

/// The single bucket a path falls into under the classification precedence
///
/// When both a staged and an unstaged change apply to one path, the staged
/// state wins; `Untracked` applies only to paths known to neither the index
/// nor the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    Untracked,
    NewlyStaged,
    StagedModified,
    StagedDeleted,
    UnstagedModified,
    UnstagedDeleted,
}

impl FileCategory {
    pub fn is_staged(&self) -> bool {
        matches!(
            self,
            FileCategory::NewlyStaged | FileCategory::StagedModified | FileCategory::StagedDeleted
        )
    }

    pub fn is_unstaged(&self) -> bool {
        matches!(
            self,
            FileCategory::UnstagedModified | FileCategory::UnstagedDeleted
        )
    }

    /// Long-format label, colored for terminals
    pub fn long_label(&self) -> String {
        let label = match self {
            FileCategory::Untracked => "".normal(),
            FileCategory::NewlyStaged => "new file:   ".green(),
            FileCategory::StagedModified => "modified:   ".green(),
            FileCategory::StagedDeleted => "deleted:    ".green(),
            FileCategory::UnstagedModified => "modified:   ".red(),
            FileCategory::UnstagedDeleted => "deleted:    ".red(),
        };
        format!("{:>width$}{}", "", label, width = LABEL_WIDTH)
    }

    /// Collapse a two-column change into its dominant category
    pub fn from_change(change: &FileChange) -> Option<Self> {
        match &change.index_change {
            IndexChangeType::Added => return Some(FileCategory::NewlyStaged),
            IndexChangeType::Modified => return Some(FileCategory::StagedModified),
            IndexChangeType::Deleted => return Some(FileCategory::StagedDeleted),
            IndexChangeType::None => {}
        }
        match &change.workspace_change {
            WorkspaceChangeType::Modified => Some(FileCategory::UnstagedModified),
            WorkspaceChangeType::Deleted => Some(FileCategory::UnstagedDeleted),
            WorkspaceChangeType::None => None,
        }
    }
}
