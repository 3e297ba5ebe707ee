use crate::artifacts::diff::diff_algorithm::{EditKind, LineEdit};

/// Contiguous run of edits around one or more changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<'a> {
    a_before: usize,
    b_before: usize,
    edits: Vec<LineEdit<'a>>,
}

impl<'a> Hunk<'a> {
    /// Group an edit script into hunks
    ///
    /// Every change is kept together with up to `context` equal lines on each
    /// side; changes whose context regions touch end up in the same hunk.
    /// Equal runs farther than `context` from any change are dropped.
    pub fn filter(edits: Vec<LineEdit<'a>>, context: usize) -> Vec<Hunk<'a>> {
        let changes = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| edit.is_change())
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in changes {
            let start = idx.saturating_sub(context);
            let end = (idx + context).min(edits.len() - 1);

            match ranges.last_mut() {
                Some((_, last_end)) if start <= *last_end + 1 => *last_end = end,
                _ => ranges.push((start, end)),
            }
        }

        let mut hunks = Vec::with_capacity(ranges.len());
        let (mut a_pos, mut b_pos, mut cursor) = (0, 0, 0);
        let mut edits = edits.into_iter();

        for (start, end) in ranges {
            for skipped in edits.by_ref().take(start - cursor) {
                a_pos += usize::from(skipped.a_line.is_some());
                b_pos += usize::from(skipped.b_line.is_some());
            }

            let hunk_edits = edits.by_ref().take(end - start + 1).collect::<Vec<_>>();
            let hunk = Hunk {
                a_before: a_pos,
                b_before: b_pos,
                edits: hunk_edits,
            };
            a_pos += hunk.a_size();
            b_pos += hunk.b_size();
            cursor = end + 1;

            hunks.push(hunk);
        }

        hunks
    }

    pub fn edits(&self) -> &[LineEdit<'a>] {
        &self.edits
    }

    /// One-based first line on the `a` side, or the count of preceding lines when empty
    pub fn a_start(&self) -> usize {
        if self.a_size() == 0 {
            self.a_before
        } else {
            self.a_before + 1
        }
    }

    pub fn b_start(&self) -> usize {
        if self.b_size() == 0 {
            self.b_before
        } else {
            self.b_before + 1
        }
    }

    pub fn a_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| edit.kind != EditKind::Insert)
            .count()
    }

    pub fn b_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| edit.kind != EditKind::Delete)
            .count()
    }

    /// `@@ -<start>,<len> +<start>,<len> @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start(),
            self.a_size(),
            self.b_start(),
            self.b_size()
        )
    }
}
