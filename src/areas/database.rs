//! Content-addressable object store
//!
//! Payloads live zlib-compressed under `objects/<hash[0..2]>/<hash[2..]>`.
//! Objects are immutable once written: storing content whose hash already
//! exists is a no-op beyond the existence check, which is what de-duplicates
//! N identical files into one stored object. Writes go through a temp file
//! and rename so a reader never observes a partial object.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object, returning its content hash
    ///
    /// Idempotent: if the hash is already present on disk nothing is written.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let content = object.serialize()?;
        let oid = ObjectId::hash_bytes(&content);
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, content)?;
        }

        Ok(oid)
    }

    /// Fetch and decompress an object's payload
    ///
    /// A missing object is `ObjectNotFound`: repository corruption or a logic
    /// error, never a recoverable condition. Decompression failures propagate
    /// for the same reason.
    pub fn load(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            return Err(RepositoryError::ObjectNotFound(oid.to_string()).into());
        }

        let compressed = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(compressed.into())
            .with_context(|| format!("corrupt object {}", oid))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).exists()
    }

    pub fn parse_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let payload = self.load(oid)?;
        Tree::deserialize(Cursor::new(payload))
    }

    pub fn parse_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let payload = self.load(oid)?;
        Commit::deserialize(Cursor::new(payload))
    }

    /// Resolve a tree recursively into a flat `(path -> entry)` mapping
    ///
    /// The inverse of the tree builder: subtree records recurse with their
    /// name appended to the prefix, blob records land in the map.
    pub fn flatten_tree(
        &self,
        oid: &ObjectId,
        prefix: &Path,
        out: &mut BTreeMap<PathBuf, DatabaseEntry>,
    ) -> anyhow::Result<()> {
        let tree = self.parse_tree(oid)?;

        for (name, entry) in tree.entries() {
            let path = prefix.join(name);
            if entry.mode.is_directory() {
                self.flatten_tree(&entry.oid, &path, out)?;
            } else {
                out.insert(path, entry.clone());
            }
        }

        Ok(())
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&compressed).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to make the write atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed| compressed.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Unable to decompress object content")?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
