use crate::artifacts::diff::file_edit::FileEditKind;
use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// A divergence between two of the three states (HEAD, index, working tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeType {
    Created,
    Modified,
    Deleted,
}

impl ChangeType {
    /// `None` for an unmodified file
    pub fn from_edit(edit: FileEditKind) -> Option<Self> {
        match edit {
            FileEditKind::Created => Some(ChangeType::Created),
            FileEditKind::Modified => Some(ChangeType::Modified),
            FileEditKind::Deleted => Some(ChangeType::Deleted),
            FileEditKind::Unmodified => None,
        }
    }

    pub fn short_code(&self) -> char {
        match self {
            ChangeType::Created => 'A',
            ChangeType::Modified => 'M',
            ChangeType::Deleted => 'D',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Created => "new file:   ",
            ChangeType::Modified => "modified:   ",
            ChangeType::Deleted => "deleted:    ",
        }
    }
}

/// Per-file changes: `head` is HEAD against the index (staged), `worktree`
/// is the index against the working tree (unstaged)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Changes {
    pub head: Option<ChangeType>,
    pub worktree: Option<ChangeType>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.worktree.is_none()
    }

    /// Fill in whichever side `other` knows about and `self` does not
    pub fn merge(&mut self, other: Changes) {
        self.head = self.head.or(other.head);
        self.worktree = self.worktree.or(other.worktree);
    }

    /// Two-column code, staged first: `AM`, ` D`, ...
    pub fn short_code(&self) -> String {
        let code = |change: Option<ChangeType>| change.map_or(' ', |change| change.short_code());

        format!("{}{}", code(self.head), code(self.worktree))
    }
}

/// A change placed in one of the report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeType {
    Staged(ChangeType),
    Unstaged(ChangeType),
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let colored_str = match self {
            FileChangeType::Staged(change) => change.label().green(),
            FileChangeType::Unstaged(change) => change.label().red(),
        };
        write!(f, "{:>width$}{}", "", colored_str, width = LABEL_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, "  ")]
    #[case(Some(ChangeType::Created), None, "A ")]
    #[case(None, Some(ChangeType::Deleted), " D")]
    #[case(Some(ChangeType::Modified), Some(ChangeType::Modified), "MM")]
    fn renders_short_codes(
        #[case] head: Option<ChangeType>,
        #[case] worktree: Option<ChangeType>,
        #[case] expected: &str,
    ) {
        assert_eq!(Changes { head, worktree }.short_code(), expected);
    }

    #[test]
    fn merge_keeps_both_sides() {
        let mut changes = Changes {
            head: Some(ChangeType::Modified),
            worktree: None,
        };

        changes.merge(Changes {
            head: None,
            worktree: Some(ChangeType::Deleted),
        });

        assert_eq!(changes.head, Some(ChangeType::Modified));
        assert_eq!(changes.worktree, Some(ChangeType::Deleted));
    }
}
