use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;

/// Commits reachable from `start` through parent links, newest first
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    start: Option<ObjectId>,
    max_count: Option<usize>,
}

impl<'d> IntoIterator for RevList<'d> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: self.start,
            remaining: self.max_count,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
    remaining: Option<usize>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let commit_oid = self.current_commit_oid.take()?;

        match self
            .database
            .get_commit(&commit_oid)
            .with_context(|| format!("unable to walk history at {commit_oid}"))
        {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                self.remaining = self.remaining.map(|remaining| remaining - 1);
                Some(Ok((commit_oid, commit)))
            }
            // the walk ends on the first unreadable commit
            Err(e) => Some(Err(e)),
        }
    }
}
