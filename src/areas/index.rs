//! Staging index
//!
//! The index is the sole durable staging-area state: an ordered mapping of
//! repository-relative path to (mode, content hash, observed mtime), persisted
//! as one text record per line. Paths are unique by construction; re-staging
//! a path replaces its entry in place.
//!
//! Reads take a shared `file_guard` lock; the flush writes the whole index to
//! a temp file under an exclusive lock and renames it into place, so readers
//! observe either the prior index or the updated one, never a partial write.

use crate::artifacts::index::index_entry::IndexEntry;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.tgit/index`)
    path: Box<Path>,
    /// Staged entries keyed by repository-relative path
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Flag indicating unflushed modifications
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk, replacing all in-memory state
    ///
    /// Trailing blank lines are tolerated; malformed records are skipped with
    /// a diagnostic so one bad line never poisons the rest of the index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            std::fs::File::create(self.path())?;
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        std::io::Read::read_to_string(lock.deref_mut(), &mut content)?;

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }

            match IndexEntry::parse_record(line) {
                Ok(entry) => {
                    self.entries.insert(entry.path.clone(), entry);
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping malformed index record");
                }
            }
        }

        Ok(())
    }

    /// Flush the index to disk atomically (temp file + rename)
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Index file has no parent directory"))?;
        let temp_path = index_dir.join(format!("tmp-index-{}", rand::random::<u32>()));

        {
            let mut temp_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut lock =
                file_guard::lock(&mut temp_file, file_guard::Lock::Exclusive, 0, 1)?;

            for entry in self.entries.values() {
                writeln!(lock.deref_mut(), "{}", entry.to_record())?;
            }
            lock.deref_mut().flush()?;
        }

        std::fs::rename(&temp_path, self.path())?;
        self.changed = false;

        Ok(())
    }

    /// Insert or replace the entry for a path (last write wins)
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path.clone(), entry);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &Path) -> Option<IndexEntry> {
        let removed = self.entries.remove(path);
        if removed.is_some() {
            self.changed = true;
        }
        removed
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Paths of all staged entries at or under `path`
    pub fn entries_under_path(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|entry_path| {
                if path == Path::new(".") {
                    return true;
                }
                entry_path.starts_with(path)
            })
            .map(|p| p.to_path_buf())
            .collect()
    }
}
