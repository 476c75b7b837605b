//! Tree objects and the recursive tree builder
//!
//! A persisted [`Tree`] describes exactly one directory level. Its payload is
//! the newline-joined record sequence
//!
//! ```text
//! <mode> <blob|tree> <name>\0<hash>
//! ```
//!
//! sorted by entry name. The NUL separator can appear in neither a legal path
//! nor a hex hash. Because the payload is canonical, two directories with
//! identical (name, kind, content) entries collapse to the same stored object
//! regardless of staging order or which commit references them.
//!
//! [`TreeNode`] is the in-memory intermediate used while turning the flat
//! staging index into the tree graph; it is never persisted itself.

use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Persisted directory snapshot: (name -> (mode, hash)), name-sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, DatabaseEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        // BTreeMap iteration order gives the canonical name sort
        let records = self
            .entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\0{}",
                    entry.mode.as_str(),
                    entry.object_type().as_str(),
                    name,
                    entry.oid
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Bytes::from(records))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let malformed = |detail: String| RepositoryError::MalformedObjectRecord {
            kind: "tree",
            detail,
        };

        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content =
            String::from_utf8(content).map_err(|e| malformed(format!("invalid UTF-8: {e}")))?;

        let mut entries = BTreeMap::new();
        for record in content.split('\n').filter(|line| !line.is_empty()) {
            let (head, hash) = record
                .split_once('\0')
                .ok_or_else(|| malformed(format!("missing NUL separator in {record:?}")))?;

            let mut fields = head.splitn(3, ' ');
            let mode = fields
                .next()
                .ok_or_else(|| malformed(format!("missing mode in {record:?}")))?;
            let kind = fields
                .next()
                .ok_or_else(|| malformed(format!("missing kind in {record:?}")))?;
            let name = fields
                .next()
                .ok_or_else(|| malformed(format!("missing name in {record:?}")))?;

            let mode = EntryMode::try_from(mode)
                .map_err(|_| malformed(format!("invalid mode in {record:?}")))?;
            let kind = ObjectType::try_from(kind)
                .map_err(|_| malformed(format!("invalid kind in {record:?}")))?;
            let oid = ObjectId::try_parse(hash.to_string())
                .map_err(|_| malformed(format!("invalid hash in {record:?}")))?;

            // the kind column must agree with the mode
            let entry = DatabaseEntry::new(oid, mode);
            if entry.object_type() != kind {
                return Err(malformed(format!("kind/mode mismatch in {record:?}")).into());
            }

            entries.insert(name.to_string(), entry);
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type().as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// In-memory node of the tree under construction
///
/// Built once from an immutable slice of index entries and resolved bottom-up;
/// each resolved node becomes one stored [`Tree`]. The builder never mutates a
/// shared directory map across calls.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    files: BTreeMap<String, IndexEntry>,
    subtrees: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Partition flat index entries into a directory hierarchy
    ///
    /// The first path segment selects the subtree; remaining segments recurse.
    pub fn build(entries: &[IndexEntry]) -> anyhow::Result<Self> {
        Self::build_at(entries, 0)
    }

    fn build_at(entries: &[IndexEntry], depth: usize) -> anyhow::Result<Self> {
        let mut files = BTreeMap::new();
        let mut groups = BTreeMap::<String, Vec<IndexEntry>>::new();

        for entry in entries {
            let segments = entry.components()?;
            anyhow::ensure!(
                segments.len() > depth,
                "index entry {:?} shorter than its tree depth",
                entry.path
            );

            if segments.len() == depth + 1 {
                files.insert(segments[depth].to_string(), entry.clone());
            } else {
                groups
                    .entry(segments[depth].to_string())
                    .or_default()
                    .push(entry.clone());
            }
        }

        let mut subtrees = BTreeMap::new();
        for (name, group) in groups {
            subtrees.insert(name, Self::build_at(&group, depth + 1)?);
        }

        Ok(TreeNode { files, subtrees })
    }

    /// Resolve this node to its persisted [`Tree`] form without storing it
    ///
    /// Child hashes are computed recursively, so the result's object ID is the
    /// root tree hash this node would have once written.
    pub fn to_tree(&self) -> anyhow::Result<Tree> {
        let mut records = BTreeMap::new();

        for (name, node) in &self.subtrees {
            let child_oid = node.to_tree()?.object_id()?;
            records.insert(name.clone(), DatabaseEntry::new(child_oid, EntryMode::Directory));
        }
        for (name, entry) in &self.files {
            records.insert(
                name.clone(),
                DatabaseEntry::new(entry.oid.clone(), EntryMode::from(entry.mode)),
            );
        }

        Ok(Tree::new(records))
    }

    /// Store the whole tree graph and return the root tree's hash
    ///
    /// All-or-nothing: every blob the index references must already exist in
    /// the database before any tree is written, otherwise the build aborts
    /// with `BlobRead` and no finalized tree can reference a missing blob.
    /// Children are stored before parents since parents embed their hashes.
    pub fn write_to(&self, database: &Database) -> anyhow::Result<ObjectId> {
        self.check_blobs(database)?;
        self.store(database)
    }

    fn check_blobs(&self, database: &Database) -> anyhow::Result<()> {
        for entry in self.files.values() {
            if !database.contains(&entry.oid) {
                return Err(RepositoryError::BlobRead {
                    oid: entry.oid.to_string(),
                    path: entry.path.clone(),
                }
                .into());
            }
        }
        for node in self.subtrees.values() {
            node.check_blobs(database)?;
        }

        Ok(())
    }

    fn store(&self, database: &Database) -> anyhow::Result<ObjectId> {
        let mut records = BTreeMap::new();

        for (name, node) in &self.subtrees {
            let child_oid = node.store(database)?;
            records.insert(name.clone(), DatabaseEntry::new(child_oid, EntryMode::Directory));
        }
        for (name, entry) in &self.files {
            records.insert(
                name.clone(),
                DatabaseEntry::new(entry.oid.clone(), EntryMode::from(entry.mode)),
            );
        }

        database.store(&Tree::new(records))
    }
}
