use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of staging one file, reported per path
enum StageOutcome {
    Added,
    Updated,
    AlreadyStaged,
}

impl StageOutcome {
    fn label(&self) -> &'static str {
        match self {
            StageOutcome::Added => "added",
            StageOutcome::Updated => "updated",
            StageOutcome::AlreadyStaged => "already staged",
        }
    }
}

impl Repository {
    /// Stage files for the next commit
    ///
    /// Directories expand recursively; symlinks are skipped by the walk. The
    /// index is flushed once, after every path has been staged.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let paths = paths
            .iter()
            .map(|path| {
                let relative = self.relativize_arg(path)?;
                self.workspace().list_files(Some(relative.as_path()))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let stat = self.workspace().stat_file(&path)?;

            let existing = index.entry_by_path(&path).cloned();

            let outcome = match existing {
                // unchanged stat data short-circuits the hash entirely
                Some(entry) if entry.mtime == stat.mtime && entry.mode == stat.mode => {
                    StageOutcome::AlreadyStaged
                }
                existing => {
                    let data = self.workspace().read_file(&path)?;
                    let blob = Blob::new(data);
                    let blob_id = blob.object_id()?;

                    let outcome = match existing {
                        None => StageOutcome::Added,
                        // same content under a new mtime: refresh the stat
                        // data, nothing new to store
                        Some(entry) if entry.oid == blob_id && entry.mode == stat.mode => {
                            StageOutcome::AlreadyStaged
                        }
                        Some(_) => StageOutcome::Updated,
                    };

                    self.database().store(&blob)?;
                    index.add(IndexEntry::new(stat.mode, blob_id, path.clone(), stat.mtime));

                    outcome
                }
            };

            outcomes.push((path, outcome));
        }

        index.write_updates()?;

        for (path, outcome) in outcomes {
            writeln!(self.writer(), "{}: {}", outcome.label(), path.display())?;
        }

        Ok(())
    }

    /// Resolve a command-line path argument to a repository-relative path
    pub(crate) fn relativize_arg(&self, path: &str) -> anyhow::Result<PathBuf> {
        let absolute = std::path::absolute(path)?;
        self.workspace().relativize(&absolute)
    }
}
