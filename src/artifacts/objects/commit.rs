//! Commit object
//!
//! Commits link a tree snapshot to its single parent commit, with authorship and a message.
//! History is a singly-linked chain; a commit without a `parent` line is a root commit.
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <RFC-3339 timestamp>
//! committer <name> <email> <RFC-3339 timestamp>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads `TWIG_AUTHOR_NAME`, `TWIG_AUTHOR_EMAIL`, and optionally `TWIG_AUTHOR_DATE`
    /// (RFC-3339). Without a date the current time is used.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("TWIG_AUTHOR_NAME").context("TWIG_AUTHOR_NAME not set")?;
        let email = std::env::var("TWIG_AUTHOR_EMAIL").context("TWIG_AUTHOR_EMAIL not set")?;

        Self::with_env_timestamp(name, email)
    }

    /// Parse an identity of the form `Name <email>`, stamped like [`Author::load_from_env`]
    pub fn from_identity(identity: &str) -> anyhow::Result<Self> {
        let (name, email) = split_identity(identity)
            .with_context(|| format!("invalid author {identity:?}, expected 'Name <email>'"))?;

        Self::with_env_timestamp(name.to_string(), email.to_string())
    }

    fn with_env_timestamp(name: String, email: String) -> anyhow::Result<Self> {
        let author = match std::env::var("TWIG_AUTHOR_DATE") {
            Ok(date) => {
                let timestamp = DateTime::parse_from_rfc3339(&date)
                    .with_context(|| format!("TWIG_AUTHOR_DATE is not RFC-3339: {date}"))?;
                Author::new_with_timestamp(name, email, timestamp)
            }
            Err(_) => Author::new(name, email),
        };
        author.validate()?;

        Ok(author)
    }

    /// Check that the identity survives a round trip through a commit header
    ///
    /// Line breaks would split the header and angle brackets would move the email boundary,
    /// so both are rejected with [`Error::InvalidState`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(Error::invalid_state("author name and email must not be empty"));
        }

        let forbidden = |c: char| matches!(c, '\n' | '\r' | '<' | '>');
        if self.name.contains(forbidden) {
            return Err(Error::invalid_state(format!(
                "author name {:?} contains a line break or angle bracket",
                self.name
            )));
        }
        if self.email.contains(forbidden) {
            return Err(Error::invalid_state(format!(
                "author email {:?} contains a line break or angle bracket",
                self.email
            )));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> 2024-09-25T19:32:44+06:30", the form stored in commit headers
    pub fn display(&self) -> String {
        format!("{} {}", self.display_name(), self.rfc3339_timestamp())
    }

    pub fn rfc3339_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

fn split_identity(identity: &str) -> Option<(&str, &str)> {
    let email_start = identity.find('<')?;
    let email_end = identity.rfind('>')?;
    if email_end < email_start {
        return None;
    }

    let name = identity[..email_start].trim();
    let email = &identity[email_start + 1..email_end];
    if name.is_empty() || email.is_empty() {
        return None;
    }

    Some((name, email))
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // "name <email> timestamp", the timestamp never contains spaces
        let (identity, timestamp) = value
            .rsplit_once(' ')
            .ok_or_else(|| Error::corrupt_object(format!("invalid author line: {value:?}")))?;

        let (name, email) = split_identity(identity)
            .ok_or_else(|| Error::corrupt_object(format!("invalid author identity: {identity:?}")))?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp).map_err(|e| {
            Error::corrupt_object(format!("invalid author timestamp {timestamp:?}: {e}"))
        })?;

        Ok(Author::new_with_timestamp(
            name.to_string(),
            email.to_string(),
            timestamp,
        ))
    }
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (None for a root commit)
    parent: Option<ObjectId>,
    /// Tree object ID of the snapshot
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit; the author is also recorded as committer.
    ///
    /// The stored message always ends with exactly one newline.
    pub fn new(parent: Option<ObjectId>, tree_oid: ObjectId, author: Author, message: &str) -> Self {
        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message: format!("{}\n", message.trim_end_matches('\n')),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    /// Commit date (committer timestamp)
    pub fn date(&self) -> DateTime<FixedOffset> {
        self.committer.timestamp()
    }

    /// Everything after the first blank line of the record
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn serialize(&self) -> Bytes {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));

        format!("{}\n\n{}", lines.join("\n"), self.message).into()
    }

    /// Parse a decompressed commit record
    ///
    /// Headers end at the first blank line; the message is everything after it, verbatim.
    /// A missing `parent` line means a root commit.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let content = std::str::from_utf8(content)
            .map_err(|e| Error::corrupt_object(format!("commit is not valid UTF-8: {e}")))?;
        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| Error::corrupt_object("commit has no blank line before message"))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| Error::corrupt_object(format!("invalid commit header: {line:?}")))?;

            match key {
                "tree" if tree_oid.is_none() => tree_oid = Some(parse_header_oid(value)?),
                "parent" if parent.is_none() => parent = Some(parse_header_oid(value)?),
                "author" if author.is_none() => author = Some(Author::try_from(value)?),
                "committer" if committer.is_none() => committer = Some(Author::try_from(value)?),
                _ => {
                    return Err(Error::corrupt_object(format!(
                        "unexpected commit header: {line:?}"
                    )));
                }
            }
        }

        Ok(Commit {
            parent,
            tree_oid: tree_oid.ok_or_else(|| Error::corrupt_object("commit has no tree"))?,
            author: author.ok_or_else(|| Error::corrupt_object("commit has no author"))?,
            committer: committer.ok_or_else(|| Error::corrupt_object("commit has no committer"))?,
            message: message.to_string(),
        })
    }
}

fn parse_header_oid(value: &str) -> Result<ObjectId> {
    ObjectId::try_parse(value).map_err(|e| Error::corrupt_object(format!("invalid commit header hash: {e}")))
}
