//! HEAD and branch references
//!
//! `HEAD` is a symbolic ref (`ref: refs/heads/<branch>`); each branch ref
//! file under `refs/heads` holds the hash of its tip commit. A branch ref
//! that exists but is empty marks an unborn branch with no commits yet.
//!
//! Nothing here caches: every read re-opens the files, so a HEAD rewritten
//! by another process is picked up on the next call.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (`.tgit`)
    path: Box<Path>,
}

impl Refs {
    /// Branch that HEAD currently names, re-read from disk on every call
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| format!("Unable to read HEAD at {:?}", self.head_path()))?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .ok_or_else(|| anyhow::anyhow!("HEAD is not a symbolic reference: {}", content))?;

        BranchName::try_parse(&captures[1])
    }

    /// Hash of the current branch's tip commit, `None` while the branch is
    /// unborn
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    pub fn read_branch(&self, branch: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.path.join(branch.as_ref_path());

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read ref file at {:?}", branch_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Advance the current branch to `oid`
    ///
    /// Intended as the final step of a commit: the commit only becomes
    /// reachable once this write lands.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch = self.current_branch()?;
        self.update_ref_file(
            self.path.join(branch.as_ref_path()).into_boxed_path(),
            oid.as_ref().to_string(),
        )
    }

    /// Point HEAD at a branch
    pub fn set_head(&self, branch: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: {}", branch.as_ref_path()))
    }

    /// Create an empty (unborn) branch ref file
    pub fn init_branch(&self, branch: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(
            self.path.join(branch.as_ref_path()).into_boxed_path(),
            String::new(),
        )
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("Unable to create parent directories for ref file at {:?}", path)
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("Unable to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.refs_path().join("remotes").into_boxed_path()
    }
}
