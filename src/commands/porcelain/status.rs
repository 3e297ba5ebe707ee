use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_tree::StatusReport;
use colored::Colorize;
use std::io::Write;

// Terminology:
// - staged: the index differs from HEAD
// - unstaged: the working tree differs from the index
// - untracked: in the working tree but not in the index
impl Repository {
    pub fn status(&self, short: bool) -> anyhow::Result<StatusReport> {
        let report = self.inspect()?.report();

        if short {
            self.print_short_status(&report)?;
        } else {
            self.print_long_status(&report)?;
        }

        Ok(report)
    }

    fn print_short_status(&self, report: &StatusReport) -> anyhow::Result<()> {
        for (path, changes) in &report.changed {
            writeln!(self.writer(), "{} {path}", changes.short_code())?;
        }
        for path in &report.untracked {
            writeln!(self.writer(), "?? {path}")?;
        }

        Ok(())
    }

    fn print_long_status(&self, report: &StatusReport) -> anyhow::Result<()> {
        match self.head()? {
            Head::Empty => {
                writeln!(self.writer(), "On branch {}\n", crate::DEFAULT_BRANCH)?;
                writeln!(self.writer(), "No commits yet\n")?;
            }
            Head::Ref(branch) => writeln!(self.writer(), "On branch {branch}\n")?,
            Head::Detached(id) => {
                writeln!(self.writer(), "HEAD detached at {}\n", id.to_short_oid())?
            }
        }

        let staged = report.staged().collect::<Vec<_>>();
        if !staged.is_empty() {
            writeln!(self.writer(), "Changes to be committed:")?;
            for (path, change) in staged {
                writeln!(self.writer(), "{}{path}", FileChangeType::Staged(change))?;
            }
            writeln!(self.writer())?;
        }

        let unstaged = report.unstaged().collect::<Vec<_>>();
        if !unstaged.is_empty() {
            writeln!(self.writer(), "Changes not staged for commit:")?;
            for (path, change) in unstaged {
                writeln!(self.writer(), "{}{path}", FileChangeType::Unstaged(change))?;
            }
            writeln!(self.writer())?;
        }

        if !report.untracked.is_empty() {
            writeln!(self.writer(), "Untracked files:")?;
            for path in &report.untracked {
                writeln!(self.writer(), "{:>8}{}", "", path.red())?;
            }
            writeln!(self.writer())?;
        }

        if report.is_clean() && report.untracked.is_empty() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        } else if staged_is_empty(report) && !report.untracked.is_empty() {
            writeln!(
                self.writer(),
                "nothing added to commit but untracked files present"
            )?;
        }

        Ok(())
    }
}

fn staged_is_empty(report: &StatusReport) -> bool {
    report.staged().next().is_none()
}
