//! Repository configuration
//!
//! `.tgit/config` is a flat `key = value` file. Recognized keys:
//!
//! - `user.name`, `user.email`: author identity for new commits
//! - `core.branch`: the branch name `init` seeds HEAD with
//!
//! Environment variables (`GIT_AUTHOR_NAME`, `GIT_AUTHOR_EMAIL`,
//! `GIT_AUTHOR_DATE`) take precedence over the file for author identity.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Author;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::Path;

pub const USER_NAME_KEY: &str = "user.name";
pub const USER_EMAIL_KEY: &str = "user.email";
pub const DEFAULT_BRANCH_KEY: &str = "core.branch";

const DEFAULT_BRANCH_NAME: &str = "master";

#[derive(Debug, new)]
pub struct Config {
    /// Path to the config file (`.tgit/config`)
    path: Box<Path>,
}

impl Config {
    /// Resolve the author identity for a new commit
    ///
    /// Environment variables win over the config file; `None` when neither
    /// source provides both a name and an email.
    pub fn author_identity(&self) -> anyhow::Result<Option<Author>> {
        if let Some(author) = Author::load_from_env() {
            return Ok(Some(author));
        }

        let values = self.read_values()?;
        match (values.get(USER_NAME_KEY), values.get(USER_EMAIL_KEY)) {
            (Some(name), Some(email)) => Ok(Some(Author::new(name.clone(), email.clone()))),
            _ => Ok(None),
        }
    }

    /// Branch name `init` seeds HEAD with (`core.branch`, default `master`)
    pub fn default_branch_name(&self) -> anyhow::Result<BranchName> {
        let values = self.read_values()?;
        let name = values
            .get(DEFAULT_BRANCH_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BRANCH_NAME);

        BranchName::try_parse(name)
    }

    /// Write a fresh config file, used when initializing a repository
    pub fn write_defaults(&self) -> anyhow::Result<()> {
        let content = format!("{DEFAULT_BRANCH_KEY} = {DEFAULT_BRANCH_NAME}\n");
        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write config file at {:?}", self.path))
    }

    fn read_values(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let mut values = BTreeMap::new();

        if !self.path.exists() {
            return Ok(values);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read config file at {:?}", self.path))?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    tracing::warn!(line, "skipping malformed config line");
                }
            }
        }

        Ok(values)
    }
}
