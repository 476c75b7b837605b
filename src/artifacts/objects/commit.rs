//! Commit object
//!
//! A commit links one tree snapshot to authorship metadata and, except for
//! the root commit, a parent commit. History is formed purely by the parent
//! back-reference.
//!
//! ## Format
//!
//! ```text
//! tree <hash>
//! parent <hash>          (absent on the root commit)
//! author <name> <email> <epoch-seconds> <tz-offset>
//! committer <name> <email> <epoch-seconds> <tz-offset>
//!
//! <message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

/// Author or committer identity with timestamp
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create an author stamped with the current time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Utc::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Format as `Name <email> epoch offset` for serialization
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Author identity from `GIT_AUTHOR_*` environment variables, if set
    ///
    /// `GIT_AUTHOR_DATE` is honored when parseable; otherwise the current
    /// time is used.
    pub fn load_from_env() -> Option<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").ok()?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").ok()?;
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Some(Author::new_with_timestamp(name, email, ts)),
            None => Some(Author::new(name, email)),
        }
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // "name <email> epoch offset"; split from the right since the name
        // may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format: {}", value));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid author timestamp: {}", parts[1]))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email
            .find('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let offset_seconds = parse_tz_offset(timezone)?;
        let offset = chrono::FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {}", timezone))?;
        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Parse a `+HHMM`/`-HHMM` offset into seconds east of UTC
fn parse_tz_offset(offset: &str) -> anyhow::Result<i32> {
    if offset.len() != 5 || !(offset.starts_with('+') || offset.starts_with('-')) {
        return Err(anyhow::anyhow!("Invalid timezone offset: {}", offset));
    }

    let hours: i32 = offset[1..3].parse()?;
    let minutes: i32 = offset[3..5].parse()?;
    let seconds = (hours * 3600 + minutes * 60) * if offset.starts_with('-') { -1 } else { 1 };

    Ok(seconds)
}

/// Immutable snapshot of the repository with authorship metadata
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the commit message, for short-form display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        let mut content = lines.join("\n");
        content.push('\n');

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let malformed = |detail: &str| RepositoryError::MalformedObjectRecord {
            kind: "commit",
            detail: detail.to_string(),
        };

        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content).context("commit payload is not UTF-8")?;
        let mut lines = content.lines();

        let tree_line = lines.next().ok_or_else(|| malformed("missing tree line"))?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| malformed("invalid tree line"))?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let mut next_line = lines.next().ok_or_else(|| malformed("missing author line"))?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent_oid) => {
                let parent = ObjectId::try_parse(parent_oid.to_string())?;
                next_line = lines.next().ok_or_else(|| malformed("missing author line"))?;
                Some(parent)
            }
            None => None,
        };

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| malformed("invalid author line"))?;
        let author = Author::try_from(author)?;

        let committer_line = lines
            .next()
            .ok_or_else(|| malformed("missing committer line"))?;
        committer_line
            .strip_prefix("committer ")
            .ok_or_else(|| malformed("invalid committer line"))?;

        // skip the blank separator line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parent, tree_oid, author, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let payload = self.serialize().unwrap_or_default();
        String::from_utf8_lossy(&payload).to_string()
    }
}
