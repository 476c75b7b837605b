//! Index entry representation
//!
//! Each entry tracks one file: its permission bits, the content hash of the
//! blob staged for it, the repository-relative path, and the modification
//! time observed when the entry was written. The mtime is what lets staging
//! short-circuit rehashing of unchanged files.

use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use derive_new::new;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// One staged file
#[derive(Debug, Clone, new)]
pub struct IndexEntry {
    /// Permission bits, always a file mode (directories are never staged)
    pub mode: FileMode,
    /// Content hash of the staged blob
    pub oid: ObjectId,
    /// File path relative to the repository root
    pub path: PathBuf,
    /// Modification time observed when the entry was last written
    pub mtime: i64,
}

impl IndexEntry {
    /// Path components as UTF-8 segments, root-first
    pub fn components(&self) -> anyhow::Result<Vec<&str>> {
        self.path
            .iter()
            .map(|segment| {
                segment
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("Non-UTF-8 path segment in {:?}", self.path))
            })
            .collect()
    }

    /// Serialize to the one-line text record form
    pub fn to_record(&self) -> String {
        format!(
            "{} {} {} {}",
            EntryMode::from(self.mode).as_str(),
            self.oid,
            self.path.display(),
            self.mtime
        )
    }

    /// Parse a text record, split as `<mode> <oid> <path> <mtime>`
    ///
    /// The path may contain spaces, so the mtime is taken from the right.
    pub fn parse_record(line: &str) -> anyhow::Result<Self> {
        let malformed = |line: &str| RepositoryError::MalformedIndexRecord(line.to_string());

        let mut fields = line.splitn(3, ' ');
        let mode = fields.next().ok_or_else(|| malformed(line))?;
        let oid = fields.next().ok_or_else(|| malformed(line))?;
        let rest = fields.next().ok_or_else(|| malformed(line))?;
        let (path, mtime) = rest.rsplit_once(' ').ok_or_else(|| malformed(line))?;

        if path.is_empty() {
            return Err(malformed(line).into());
        }

        let mode = FileMode::try_from(EntryMode::try_from(mode).map_err(|_| malformed(line))?)
            .map_err(|_| malformed(line))?;
        let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| malformed(line))?;
        let mtime = mtime.parse::<i64>().map_err(|_| malformed(line))?;

        Ok(IndexEntry::new(mode, oid, PathBuf::from(path), mtime))
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for IndexEntry {}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path.cmp(&other.path)
    }
}

/// Stat data sampled from the working tree for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct FileStat {
    pub mode: FileMode,
    pub mtime: i64,
}

impl TryFrom<(&Path, Metadata)> for FileStat {
    type Error = anyhow::Error;

    fn try_from((file_path, metadata): (&Path, Metadata)) -> Result<Self, Self::Error> {
        use std::os::unix::fs::MetadataExt;

        let mode = match file_path.is_executable() {
            true => FileMode::Executable,
            false => FileMode::Regular,
        };

        Ok(Self {
            mode,
            mtime: metadata.mtime(),
        })
    }
}
