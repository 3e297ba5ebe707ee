use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GotError;
use anyhow::Context;

/// Shortest abbreviated object ID accepted
const MIN_ABBREV_LENGTH: usize = 4;

/// A way of naming a commit
///
/// Supported forms:
/// - `HEAD` and its alias `@`
/// - branch names: `master`, `feature/login`
/// - full or abbreviated (at least 4 characters) object IDs; a branch of the
///   same name wins
/// - `<revision>^` for the parent and `<revision>~<n>` for the n-th ancestor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// Branch name or object ID, told apart at resolution time
    Name(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        if let Some(caps) = parent.captures(revision) {
            return Ok(Revision::Parent(Box::new(Self::try_parse(&caps[1])?)));
        }

        let ancestor = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;
        if let Some(caps) = ancestor.captures(revision) {
            let generations = caps[2].parse().map_err(|_| {
                GotError::invalid(format!("'{revision}' has an invalid generation count"))
            })?;
            return Ok(Revision::Ancestor(
                Box::new(Self::try_parse(&caps[1])?),
                generations,
            ));
        }

        let revision = REF_ALIASES.get(revision).copied().unwrap_or(revision);
        if revision == "HEAD" {
            return Ok(Revision::Head);
        }

        BranchName::try_parse(revision)?;
        Ok(Revision::Name(revision.to_string()))
    }

    /// Commit ID named by this revision
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository
                .head_id()?
                .ok_or_else(|| GotError::not_found("revision", "HEAD").into()),
            Revision::Name(name) => {
                let branch = BranchName::try_parse(name.as_str())?;
                if repository.refs().branch_exists(&branch) {
                    return repository.refs().resolve(name);
                }
                if Self::looks_like_oid(name) {
                    return Self::resolve_oid(name, repository);
                }

                Err(GotError::not_found("revision", name.as_str()).into())
            }
            Revision::Parent(base) => Self::commit_parent(&base.resolve(repository)?, repository),
            Revision::Ancestor(base, generations) => {
                let mut id = base.resolve(repository)?;
                for _ in 0..*generations {
                    id = Self::commit_parent(&id, repository)?;
                }

                Ok(id)
            }
        }
    }

    /// The branch this revision names directly, if any
    pub fn branch(&self, repository: &Repository) -> Option<BranchName> {
        match self {
            Revision::Name(name) => BranchName::try_parse(name.as_str())
                .ok()
                .filter(|branch| repository.refs().branch_exists(branch)),
            _ => None,
        }
    }

    fn commit_parent(id: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commit = repository.database().get_commit(id)?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| GotError::not_found("parent of commit", id.to_string()).into())
    }

    fn resolve_oid(prefix: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commits = repository
            .database()
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .filter(|id| {
                matches!(
                    repository.database().type_of(id),
                    Ok(ObjectType::Commit)
                )
            })
            .collect::<Vec<_>>();

        match commits.as_slice() {
            [] => Err(GotError::not_found("revision", prefix).into()),
            [id] => Ok(id.clone()),
            candidates => {
                let candidates = candidates
                    .iter()
                    .map(|id| id.to_short_oid())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(GotError::invalid(format!(
                    "short object id {prefix} is ambiguous: {candidates}"
                ))
                .into())
            }
        }
    }

    fn looks_like_oid(name: &str) -> bool {
        name.len() >= MIN_ABBREV_LENGTH
            && name.len() <= crate::artifacts::objects::OBJECT_ID_LENGTH
            && name.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn name(value: &str) -> Box<Revision> {
        Box::new(Revision::Name(value.to_string()))
    }

    #[rstest]
    #[case("main", Revision::Name("main".to_string()))]
    #[case("@", Revision::Head)]
    #[case("HEAD", Revision::Head)]
    #[case("feature/login", Revision::Name("feature/login".to_string()))]
    #[case("main^", Revision::Parent(name("main")))]
    #[case("main^^", Revision::Parent(Box::new(Revision::Parent(name("main")))))]
    #[case("@~3", Revision::Ancestor(Box::new(Revision::Head), 3))]
    #[case("a1b2c3d~0", Revision::Ancestor(name("a1b2c3d"), 0))]
    fn parses_revisions(#[case] input: &str, #[case] expected: Revision) {
        assert_eq!(Revision::try_parse(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("invalid name")]
    #[case(".invalid^")]
    #[case(".invalid~5")]
    #[case("branch.lock")]
    fn rejects_invalid_revisions(#[case] input: &str) {
        assert!(Revision::try_parse(input).is_err());
    }

    #[rstest]
    #[case("abc", false)]
    #[case("a1b2", true)]
    #[case("a1b2c3d", true)]
    #[case("xyz123", false)]
    fn recognises_abbreviated_ids(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Revision::looks_like_oid(input), expected);
    }

    proptest! {
        #[test]
        fn ancestor_suffix_keeps_its_base(
            base in "[a-z][a-z0-9_-]{0,12}",
            generations in 0usize..100
        ) {
            let parsed = Revision::try_parse(&format!("{base}~{generations}")).unwrap();

            prop_assert_eq!(parsed, Revision::Ancestor(name(&base), generations));
        }
    }
}
