use crate::artifacts::index::index_entry::FileStat;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".tgit", ".", ".."];

/// The user's working tree
///
/// All paths returned by this area are repository-relative; the repository's
/// own metadata directory and symbolic links are invisible to every walk.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List every regular file under `root` (the whole tree when `None`)
    ///
    /// Symlinks are never listed or followed. A nonexistent root is
    /// `PathNotFound`; unreadable entries encountered mid-walk are logged
    /// and skipped so the rest of the scan completes.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let absolute_root = match root {
            Some(path) => self.path.join(path),
            None => self.path.to_path_buf(),
        };

        let metadata = std::fs::symlink_metadata(&absolute_root).map_err(|_| {
            RepositoryError::PathNotFound(root.unwrap_or(Path::new(".")).to_path_buf())
        })?;

        if metadata.is_symlink() {
            return Ok(Vec::new());
        }

        if !metadata.is_dir() {
            return Ok(vec![self.relativize(&absolute_root)?]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&absolute_root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable directory entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && !entry.path_is_symlink() {
                let relative = self.relativize(entry.path())?;
                if !Self::is_ignored(&relative) {
                    files.push(relative);
                }
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let absolute = self.path.join(file_path);

        let content = std::fs::read(&absolute)
            .with_context(|| format!("Unable to read file {}", absolute.display()))?;

        Ok(content.into())
    }

    pub fn stat_file(&self, file_path: &Path) -> anyhow::Result<FileStat> {
        let absolute = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&absolute)
            .with_context(|| format!("Unable to stat file {}", absolute.display()))?;

        (absolute.as_path(), metadata).try_into()
    }

    pub fn is_directory(&self, path: &Path) -> bool {
        self.path.join(path).is_dir()
    }

    /// Strip the workspace root from an absolute path
    pub fn relativize(&self, absolute: &Path) -> anyhow::Result<PathBuf> {
        absolute
            .strip_prefix(self.path.as_ref())
            .map(PathBuf::from)
            .with_context(|| format!("Path {} escapes the workspace", absolute.display()))
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                IGNORED_PATHS.contains(&name.as_ref())
            } else {
                false
            }
        })
    }
}
