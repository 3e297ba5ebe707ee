use crate::artifacts::branch::{INVALID_BRANCH_NAME_REGEX, REF_PREFIX};
use crate::errors::GotError;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GotError::invalid("branch name cannot be empty").into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) || name == "HEAD" {
            Err(GotError::invalid(format!("'{name}' is not a valid branch name")).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Parse the branch out of a `refs/heads/<name>` path
    pub fn try_from_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        let name = ref_path.strip_prefix(REF_PREFIX).ok_or_else(|| {
            GotError::corrupt("ref", format!("'{ref_path}' does not start with '{REF_PREFIX}'"))
        })?;

        Self::try_parse(name)
    }

    /// `refs/heads/<name>`
    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}
