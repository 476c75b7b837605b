use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusReport;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Report the state of every path against the index and the last commit
    ///
    /// Read-only: neither the index nor any ref is modified by a scan.
    pub async fn status(&mut self, pathspec: Option<&str>, long: bool) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let filter = match pathspec {
            Some(path) => Some(self.relativize_arg(path)?),
            None => None,
        };

        let report = self
            .status_engine()
            .compute(&index, filter.as_deref())
            .await?;

        if long {
            self.print_long(&report)?;
        } else {
            self.print_short(&report)?;
        }

        Ok(())
    }

    fn print_short(&self, report: &StatusReport) -> anyhow::Result<()> {
        for (path, change) in &report.changed {
            writeln!(self.writer(), "{} {}", change, path.display())?;
        }
        for path in &report.untracked {
            writeln!(self.writer(), "?? {}", path.display())?;
        }

        Ok(())
    }

    fn print_long(&self, report: &StatusReport) -> anyhow::Result<()> {
        let branch = self.refs().current_branch()?;
        writeln!(self.writer(), "On branch {}", branch)?;

        if !report.has_commits {
            writeln!(self.writer(), "\nNo commits yet")?;
        }

        // each path lands in exactly one section
        let buckets = report.partition();

        let staged = buckets
            .iter()
            .filter(|(_, category)| category.is_staged())
            .collect::<Vec<_>>();
        if !staged.is_empty() {
            writeln!(self.writer(), "\nChanges to be committed:")?;
            for (path, category) in staged {
                writeln!(self.writer(), "{}{}", category.long_label(), path.display())?;
            }
        }

        let unstaged = buckets
            .iter()
            .filter(|(_, category)| category.is_unstaged())
            .collect::<Vec<_>>();
        if !unstaged.is_empty() {
            writeln!(self.writer(), "\nChanges not staged for commit:")?;
            for (path, category) in unstaged {
                writeln!(self.writer(), "{}{}", category.long_label(), path.display())?;
            }
        }

        if !report.untracked.is_empty() {
            writeln!(self.writer(), "\nUntracked files:")?;
            for path in &report.untracked {
                writeln!(self.writer(), "        {}", path.display())?;
            }
        }

        if report.is_clean() {
            writeln!(self.writer(), "\nnothing to commit, working tree clean")?;
        }

        Ok(())
    }
}
