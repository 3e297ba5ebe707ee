//! HEAD state
//!
//! HEAD is stored as raw text with no discriminator. Its state is derived by
//! matching that text on every read:
//!
//! - empty: no commit exists yet
//! - `refs/heads/<name>`: on a branch
//! - 40 hex characters: detached at a commit

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{OBJECT_ID_REGEX, SYMBOLIC_REF_REGEX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GotError;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Empty,
    Ref(BranchName),
    Detached(ObjectId),
}

impl Head {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Head::Empty);
        }

        let symbolic_ref = regex::Regex::new(SYMBOLIC_REF_REGEX)
            .with_context(|| format!("invalid symbolic ref regex: {SYMBOLIC_REF_REGEX}"))?;
        if let Some(caps) = symbolic_ref.captures(text) {
            return Ok(Head::Ref(BranchName::try_parse(&caps[1]).map_err(|_| {
                GotError::corrupt("HEAD", format!("'{text}' names an invalid branch"))
            })?));
        }

        let object_id = regex::Regex::new(OBJECT_ID_REGEX)
            .with_context(|| format!("invalid object id regex: {OBJECT_ID_REGEX}"))?;
        if object_id.is_match(text) {
            return Ok(Head::Detached(ObjectId::try_parse(text).map_err(|_| {
                GotError::corrupt("HEAD", format!("'{text}' is not an object id"))
            })?));
        }

        Err(GotError::corrupt("HEAD", format!("'{text}' is neither a ref nor an object id")).into())
    }

    /// The raw text persisted in the HEAD file
    pub fn to_text(&self) -> String {
        match self {
            Head::Empty => String::new(),
            Head::Ref(branch) => branch.to_ref_path(),
            Head::Detached(id) => id.to_string(),
        }
    }

    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Head::Ref(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }
}
