//! Commit object
//!
//! Commits record a snapshot (a tree ID) together with its history link and metadata:
//! - A tree object ID
//! - An optional parent commit ID (absent for the root commit)
//! - An author line
//! - A message
//!
//! ## Format
//!
//! On disk: `commit <size>\0{"tree":..,"parent":..,"author":..,"message":..}`
//!
//! Identity is not derived from the stored body but from the concatenation
//! `tree ∥ parent ∥ author ∥ message`, the parent being omitted for a root commit.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GotError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

const DEFAULT_AUTHOR_NAME: &str = "John Doe";
const DEFAULT_AUTHOR_EMAIL: &str = "john@doe.com";

/// Author information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// The line stored in a commit: "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GOT_AUTHOR_NAME, GOT_AUTHOR_EMAIL and GOT_AUTHOR_DATE. Missing
    /// name or email fall back to a placeholder identity; a missing or
    /// unparsable date means now.
    pub fn load_from_env() -> Self {
        let name = std::env::var("GOT_AUTHOR_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string());
        let email = std::env::var("GOT_AUTHOR_EMAIL")
            .ok()
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string());
        let timestamp = std::env::var("GOT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| GotError::corrupt("author", format!("{reason} in '{value}'"));

        // "name <email> timestamp timezone", split from the right
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(invalid("missing timestamp").into());
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| invalid("invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| invalid("missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|end| *end > email_start)
            .ok_or_else(|| invalid("missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| invalid("invalid timezone"))?
        .offset()
        .to_owned();
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| invalid("timestamp out of range"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp: datetime,
        })
    }
}

/// Commit object
///
/// The author is kept as the exact stored line so that the identity
/// computed before storing matches the one recomputed after a round trip.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    tree: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<ObjectId>,
    author: String,
    message: String,
}

impl Commit {
    pub fn new(tree: ObjectId, parent: Option<ObjectId>, author: &Author, message: String) -> Self {
        Commit {
            tree,
            parent,
            author: author.display(),
            message,
        }
    }

    /// First line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    /// Structured view of the author line
    pub fn author(&self) -> anyhow::Result<Author> {
        Author::try_from(self.author.as_str())
    }

    /// Bytes feeding the commit ID
    fn hash_input(&self) -> Vec<u8> {
        let mut input = Vec::new();
        input.extend_from_slice(self.tree.as_ref().as_bytes());
        if let Some(parent) = &self.parent {
            input.extend_from_slice(parent.as_ref().as_bytes());
        }
        input.extend_from_slice(self.author.as_bytes());
        input.extend_from_slice(self.message.as_bytes());

        input
    }
}

impl Packable for Commit {
    fn pack(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

impl Unpackable for Commit {
    fn unpack(reader: impl BufRead) -> anyhow::Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| GotError::corrupt("commit", e.to_string()).into())
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::from_content(self.hash_input()))
    }
}
