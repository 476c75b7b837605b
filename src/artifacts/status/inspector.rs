use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::{FileStat, IndexEntry};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;

/// Per-entry comparison rules for the status scan
///
/// Stat data is consulted first so unchanged files are classified without
/// rehashing; content is hashed only when the observed mtime or mode differs
/// from the index entry.
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    pub fn check_index_against_workspace(
        &self,
        entry: &IndexEntry,
        stat: Option<&FileStat>,
    ) -> anyhow::Result<WorkspaceChangeType> {
        match stat {
            None => Ok(WorkspaceChangeType::Deleted),
            Some(stat) if entry.mode != stat.mode => Ok(WorkspaceChangeType::Modified),
            Some(stat) if entry.mtime == stat.mtime => Ok(WorkspaceChangeType::None),
            Some(_) if self.is_content_changed(entry)? => Ok(WorkspaceChangeType::Modified),
            Some(_) => Ok(WorkspaceChangeType::None),
        }
    }

    pub fn check_index_against_head_tree(
        &self,
        entry: &IndexEntry,
        head_entry: Option<&DatabaseEntry>,
    ) -> IndexChangeType {
        match head_entry {
            None => IndexChangeType::Added,
            Some(head_entry)
                if head_entry.oid != entry.oid
                    || head_entry.mode != EntryMode::from(entry.mode) =>
            {
                IndexChangeType::Modified
            }
            Some(_) => IndexChangeType::None,
        }
    }

    fn is_content_changed(&self, entry: &IndexEntry) -> anyhow::Result<bool> {
        let data = self.repository.workspace().read_file(&entry.path)?;
        let oid = Blob::new(data).object_id()?;

        Ok(oid != entry.oid)
    }
}
