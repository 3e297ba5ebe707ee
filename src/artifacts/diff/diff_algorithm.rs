//! Longest common subsequence diff
//!
//! Lines are the pieces of a buffer split after each `\n`, terminator
//! included, so concatenating them gives the buffer back. `"a\n"` and `"a"`
//! are therefore different lines.
//!
//! The table cell `(i, j)` holds the LCS length of the first `i` lines of `b`
//! and the first `j` lines of `a`. Backtracking from the bottom-right corner
//! yields the edit script in reverse.

use crate::artifacts::diff::HUNK_CONTEXT;
use crate::artifacts::diff::hunk::Hunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Equal,
    Insert,
    Delete,
}

impl EditKind {
    pub fn symbol(&self) -> char {
        match self {
            EditKind::Equal => ' ',
            EditKind::Insert => '+',
            EditKind::Delete => '-',
        }
    }
}

/// One line of an edit script
///
/// Line numbers are zero-based; a side the line does not exist on has `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit<'a> {
    pub kind: EditKind,
    pub a_line: Option<usize>,
    pub b_line: Option<usize>,
    pub text: &'a [u8],
}

impl<'a> LineEdit<'a> {
    pub fn equal(a_line: usize, b_line: usize, text: &'a [u8]) -> Self {
        LineEdit {
            kind: EditKind::Equal,
            a_line: Some(a_line),
            b_line: Some(b_line),
            text,
        }
    }

    pub fn insert(b_line: usize, text: &'a [u8]) -> Self {
        LineEdit {
            kind: EditKind::Insert,
            a_line: None,
            b_line: Some(b_line),
            text,
        }
    }

    pub fn delete(a_line: usize, text: &'a [u8]) -> Self {
        LineEdit {
            kind: EditKind::Delete,
            a_line: Some(a_line),
            b_line: None,
            text,
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != EditKind::Equal
    }

    /// Line text without its terminator
    pub fn content(&self) -> &'a [u8] {
        self.text.strip_suffix(b"\n").unwrap_or(self.text)
    }

    /// Only the last line of a buffer can lack a terminator
    pub fn has_newline(&self) -> bool {
        self.text.ends_with(b"\n")
    }
}

impl std::fmt::Display for LineEdit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            self.kind.symbol(),
            String::from_utf8_lossy(self.content())
        )
    }
}

pub trait DiffAlgorithm<'a> {
    /// Full edit script in document order
    fn diff(&self) -> Vec<LineEdit<'a>>;

    /// Edit script reduced to the hunks surrounding changes
    fn flatten_diff(&self) -> Vec<Hunk<'a>> {
        Hunk::filter(self.diff(), HUNK_CONTEXT)
    }
}

pub struct LcsDiff<'a> {
    a: Vec<&'a [u8]>,
    b: Vec<&'a [u8]>,
}

impl<'a> LcsDiff<'a> {
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        LcsDiff {
            a: split_lines(a),
            b: split_lines(b),
        }
    }

    fn lcs_table(&self) -> Vec<Vec<usize>> {
        let (m, n) = (self.b.len(), self.a.len());
        let mut table = vec![vec![0usize; n + 1]; m + 1];

        for i in 1..=m {
            for j in 1..=n {
                table[i][j] = if self.b[i - 1] == self.a[j - 1] {
                    table[i - 1][j - 1] + 1
                } else {
                    table[i - 1][j].max(table[i][j - 1])
                };
            }
        }

        table
    }
}

impl<'a> DiffAlgorithm<'a> for LcsDiff<'a> {
    fn diff(&self) -> Vec<LineEdit<'a>> {
        let table = self.lcs_table();
        let mut edits = Vec::with_capacity(self.a.len().max(self.b.len()));
        let (mut i, mut j) = (self.b.len(), self.a.len());

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && self.b[i - 1] == self.a[j - 1] {
                edits.push(LineEdit::equal(j - 1, i - 1, self.a[j - 1]));
                i -= 1;
                j -= 1;
            } else if i > 0 && (j == 0 || table[i - 1][j] >= table[i][j - 1]) {
                edits.push(LineEdit::insert(i - 1, self.b[i - 1]));
                i -= 1;
            } else {
                edits.push(LineEdit::delete(j - 1, self.a[j - 1]));
                j -= 1;
            }
        }

        edits.reverse();
        edits
    }
}

/// Line-level edit script turning `a` into `b`
pub fn diff_bytes<'a>(a: &'a [u8], b: &'a [u8]) -> Vec<LineEdit<'a>> {
    LcsDiff::new(a, b).diff()
}

pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    data.split_inclusive(|byte| *byte == b'\n').collect()
}
