use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Finish initializing a freshly created repository
    ///
    /// The directory skeleton, config and HEAD are laid down by
    /// [`Repository::init_at`]; this seeds the empty index file and reports.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let index = index.lock().await;

        if !index.path().exists() {
            std::fs::write(index.path(), b"").context("Failed to create .tgit/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
