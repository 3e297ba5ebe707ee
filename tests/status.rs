use assert_fs::TempDir;
use common::command::repository_dir;
use common::file::{delete_path, generated_lines, write_generated_files};
use common::repository::{init_repository, paths, write};
use got::artifacts::status::file_change::{ChangeType, Changes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;

mod common;

fn changes(head: Option<ChangeType>, worktree: Option<ChangeType>) -> Changes {
    Changes { head, worktree }
}

/// Committed `a.txt`, `b.txt`, `c.txt` and `d/e.txt`, then one change of
/// every kind
fn prepare_three_way_changes(dir: &TempDir) -> got::Repository {
    let (repository, _) = init_repository(dir.path());
    for name in ["a.txt", "b.txt", "c.txt", "d/e.txt"] {
        write(dir.path(), name, &generated_lines(3));
    }
    repository.add(&paths(&["."])).unwrap();
    repository.commit("Initial commit").unwrap();

    write(dir.path(), "a.txt", "changed in the working tree\n");
    write(dir.path(), "b.txt", "changed and staged\n");
    repository.add(&paths(&["b.txt"])).unwrap();
    delete_path(&dir.path().join("c.txt"));
    write(dir.path(), "new.txt", "staged\n");
    write(dir.path(), "am.txt", "staged\n");
    repository.add(&paths(&["new.txt", "am.txt"])).unwrap();
    write(dir.path(), "am.txt", "staged, then changed\n");
    write(dir.path(), "u.txt", "untracked\n");
    write(dir.path(), "x/y.txt", "untracked directory\n");

    repository
}

#[rstest]
fn classifies_changes_between_head_index_and_working_tree(repository_dir: TempDir) {
    let repository = prepare_three_way_changes(&repository_dir);

    let report = repository.inspect().unwrap().report();

    let changed = report
        .changed
        .iter()
        .map(|(path, changes)| (path.as_str(), *changes))
        .collect::<Vec<_>>();
    assert_eq!(
        changed,
        vec![
            ("a.txt", changes(None, Some(ChangeType::Modified))),
            (
                "am.txt",
                changes(Some(ChangeType::Created), Some(ChangeType::Modified))
            ),
            ("b.txt", changes(Some(ChangeType::Modified), None)),
            ("c.txt", changes(None, Some(ChangeType::Deleted))),
            ("new.txt", changes(Some(ChangeType::Created), None)),
        ]
    );
    assert_eq!(
        report.untracked,
        BTreeSet::from(["u.txt".to_string(), "x/".to_string()])
    );
    assert!(!report.is_clean());
}

#[rstest]
fn prints_short_status_in_path_order(repository_dir: TempDir) {
    prepare_three_way_changes(&repository_dir);
    let (repository, output) = common::repository::open_repository(repository_dir.path());

    repository.status(true).unwrap();

    assert_eq!(
        output.take(),
        " M a.txt\nAM am.txt\nM  b.txt\n D c.txt\nA  new.txt\n?? u.txt\n?? x/\n"
    );
}

#[rstest]
fn prints_long_status_sections(repository_dir: TempDir) {
    prepare_three_way_changes(&repository_dir);
    let (repository, output) = common::repository::open_repository(repository_dir.path());

    repository.status(false).unwrap();

    let expected = "On branch master

Changes to be committed:
        new file:   am.txt
        modified:   b.txt
        new file:   new.txt

Changes not staged for commit:
        modified:   a.txt
        modified:   am.txt
        deleted:    c.txt

Untracked files:
        u.txt
        x/

";
    assert_eq!(output.take(), expected);
}

#[rstest]
fn reports_nothing_after_a_commit(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write_generated_files(repository_dir.path(), 3);
    repository.add(&paths(&["."])).unwrap();
    repository.commit("Initial commit").unwrap();
    output.take();

    let report = repository.status(false).unwrap();

    assert!(report.is_clean());
    assert!(report.untracked.is_empty());
    assert_eq!(
        output.take(),
        "On branch master\n\nnothing to commit, working tree clean\n"
    );
}

#[rstest]
fn rewriting_a_file_with_the_same_content_is_not_a_change(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "same.txt", "content\n");
    repository.add(&paths(&["same.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();

    write(repository_dir.path(), "same.txt", "content\n");

    assert!(repository.inspect().unwrap().report().is_clean());
}

#[rstest]
fn reports_untracked_files_before_the_first_commit(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "top.txt", "top\n");
    write(repository_dir.path(), "nested/deeper/file.txt", "deep\n");

    let report = repository.status(false).unwrap();

    assert_eq!(
        report.untracked,
        BTreeSet::from(["nested/".to_string(), "top.txt".to_string()])
    );
    let printed = output.take();
    assert!(printed.starts_with("On branch master\n\nNo commits yet\n\n"));
    assert!(printed.ends_with("nothing added to commit but untracked files present\n"));
}

#[rstest]
fn files_deleted_with_their_directory_are_reported_one_by_one(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "dir/one.txt", "1\n");
    write(repository_dir.path(), "dir/two.txt", "2\n");
    repository.add(&paths(&["dir"])).unwrap();
    repository.commit("Add dir").unwrap();

    delete_path(&repository_dir.path().join("dir"));

    let report = repository.inspect().unwrap().report();
    let deleted = report.unstaged().collect::<Vec<_>>();
    assert_eq!(
        deleted,
        vec![
            (&"dir/one.txt".to_string(), ChangeType::Deleted),
            (&"dir/two.txt".to_string(), ChangeType::Deleted),
        ]
    );
}

#[rstest]
fn dropping_the_final_newline_is_an_unstaged_change(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "a\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();
    write(repository_dir.path(), "a.txt", "a");
    output.take();

    let report = repository.status(true).unwrap();

    assert_eq!(
        report.changed.get("a.txt"),
        Some(&changes(None, Some(ChangeType::Modified)))
    );
    assert_eq!(report.unstaged().count(), 1);
    assert_eq!(output.take(), " M a.txt\n");
}
