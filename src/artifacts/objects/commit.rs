//! Commit record consumed by the graph layout
//!
//! A commit as seen by the layout engine is a hash, its ordered parent hashes and
//! any ref names pointing at it. Author, date and message ride along for display
//! and play no part in lane assignment.
//!
//! ## Wire format
//!
//! ```text
//! {
//!   "hash": "3f2a9c1...",
//!   "parents": ["a81b0e2...", "77c0d1f..."],
//!   "refs": ["HEAD", "main"],
//!   "author": "Jane Doe",
//!   "email": "jane@example.com",
//!   "date": "2024-01-01T10:00:00+00:00",
//!   "message": "Merge branch 'feature'"
//! }
//! ```
//!
//! Only `hash` is required. A missing or `null` `parents` field reads as a root
//! commit, and `parents[0]` is always the first (mainline) parent.

use crate::artifacts::objects::commit_hash::CommitHash;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    hash: CommitHash,
    /// Parent hashes, first parent first (empty for a root commit)
    #[serde(default, deserialize_with = "null_as_empty")]
    parents: Vec<CommitHash>,
    /// Ref names decorating this commit (branches, tags, HEAD)
    #[serde(default, deserialize_with = "null_as_empty")]
    refs: Vec<String>,
    #[serde(default)]
    author: String,
    #[serde(default)]
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    message: String,
}

impl Commit {
    /// Create a commit with no display metadata
    ///
    /// # Arguments
    ///
    /// * `hash` - Commit hash
    /// * `parents` - Parent hashes, first parent first
    pub fn new(hash: impl Into<CommitHash>, parents: Vec<CommitHash>) -> Self {
        Commit {
            hash: hash.into(),
            parents,
            refs: Vec::new(),
            author: String::new(),
            email: String::new(),
            date: None,
            message: String::new(),
        }
    }

    pub fn with_refs(mut self, refs: Vec<String>) -> Self {
        self.refs = refs;
        self
    }

    pub fn with_author(mut self, author: String, email: String) -> Self {
        self.author = author;
        self.email = email;
        self
    }

    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = message;
        self
    }

    pub fn hash(&self) -> &CommitHash {
        &self.hash
    }

    pub fn parents(&self) -> &[CommitHash] {
        &self.parents
    }

    /// Mainline parent, if any
    pub fn first_parent(&self) -> Option<&CommitHash> {
        self.parents.first()
    }

    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., one row of a graph)
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
