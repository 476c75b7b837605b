use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Remove files from the staging index
    ///
    /// Working-tree files are left alone. All paths are validated before the
    /// index is touched, so a failure on any argument leaves every entry
    /// staged and the on-disk index unchanged.
    pub async fn rm(&mut self, paths: &[String], recursive: bool) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let mut to_remove = Vec::<PathBuf>::new();
        for path in paths {
            let relative = self.relativize_arg(path)?;
            let staged = index.entries_under_path(&relative);

            if staged.is_empty() {
                return Err(RepositoryError::NotStaged(relative).into());
            }

            let is_directory = self.workspace().is_directory(&relative)
                || staged.iter().any(|entry_path| entry_path != &relative);
            if is_directory && !recursive {
                return Err(RepositoryError::RecursionRequired(relative).into());
            }

            to_remove.extend(staged);
        }

        for path in &to_remove {
            index.remove(path);
        }
        index.write_updates()?;

        for path in to_remove {
            writeln!(self.writer(), "removed: {}", path.display())?;
        }

        Ok(())
    }
}
