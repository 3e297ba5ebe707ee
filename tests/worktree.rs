use assert_fs::TempDir;
use common::command::repository_dir;
use common::file::{delete_path, read_file};
use common::repository::{init_repository, paths, write};
use got::ErrorKind;
use got::artifacts::branch::branch_name::BranchName;
use got::artifacts::branch::head::Head;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

/// `master` holds `a.txt` and `dir/keep.txt`; `topic` also changes `a.txt`
/// and adds `dir/extra.txt`
fn two_branches(dir: &TempDir) -> got::Repository {
    let (repository, _) = init_repository(dir.path());
    write(dir.path(), "a.txt", "one\n");
    write(dir.path(), "dir/keep.txt", "keep\n");
    repository.add(&paths(&["."])).unwrap();
    repository.commit("On master").unwrap();

    repository.checkout("topic", true).unwrap();
    write(dir.path(), "a.txt", "one\ntwo\n");
    write(dir.path(), "dir/extra.txt", "extra\n");
    repository.add(&paths(&["."])).unwrap();
    repository.commit("On topic").unwrap();

    repository
}

#[rstest]
fn checkout_switches_the_working_tree_and_index(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);

    repository.checkout("master", false).unwrap();

    assert_eq!(read_file(&repository_dir.path().join("a.txt")), "one\n");
    assert!(!repository_dir.path().join("dir/extra.txt").exists());
    assert!(repository_dir.path().join("dir/keep.txt").exists());
    assert!(repository.index().entry("dir/extra.txt").is_none());
    assert!(repository.inspect().unwrap().report().is_clean());
    assert_eq!(
        repository.head().unwrap(),
        Head::Ref(BranchName::try_parse("master").unwrap())
    );

    repository.checkout("topic", false).unwrap();

    assert_eq!(read_file(&repository_dir.path().join("a.txt")), "one\ntwo\n");
    assert_eq!(
        read_file(&repository_dir.path().join("dir/extra.txt")),
        "extra\n"
    );
}

#[rstest]
fn checkout_reports_what_happened(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "one\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    let commit_id = repository.commit("Only commit").unwrap();
    output.take();

    repository.checkout("topic", true).unwrap();
    repository.checkout("master", false).unwrap();
    repository.checkout(commit_id.as_ref(), false).unwrap();

    assert_eq!(
        output.take(),
        format!(
            "Switched to a new branch 'topic'\nSwitched to branch 'master'\nHEAD is now at {} Only commit\n",
            commit_id.to_short_oid()
        )
    );
}

#[rstest]
fn checkout_refuses_uncommitted_changes(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);
    write(repository_dir.path(), "a.txt", "dirty\n");

    let error = repository.checkout("master", false).unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);
    assert_eq!(read_file(&repository_dir.path().join("a.txt")), "dirty\n");
    assert_eq!(
        repository.head().unwrap(),
        Head::Ref(BranchName::try_parse("topic").unwrap())
    );
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_files(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);
    repository.checkout("master", false).unwrap();
    write(repository_dir.path(), "dir/extra.txt", "mine\n");

    let error = repository.checkout("topic", false).unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);
    assert_eq!(
        read_file(&repository_dir.path().join("dir/extra.txt")),
        "mine\n"
    );
}

#[rstest]
fn checkout_of_a_commit_detaches_head(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);
    let master_id = repository.refs().resolve("master").unwrap();

    let head = repository.checkout(master_id.as_ref(), false).unwrap();

    assert_eq!(head, Head::Detached(master_id.clone()));
    assert!(head.is_detached());
    assert_eq!(read_file(&repository_dir.path().join("a.txt")), "one\n");

    write(repository_dir.path(), "a.txt", "detached work\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    let commit_id = repository.commit("Detached commit").unwrap();

    assert_eq!(repository.head().unwrap(), Head::Detached(commit_id));
    assert_eq!(repository.refs().resolve("master").unwrap(), master_id);
}

#[rstest]
fn checkout_of_an_unknown_target_fails(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);

    let error = repository.checkout("missing", false).unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::NotFound);
}

#[rstest]
fn restore_discards_working_tree_changes(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "original\n");
    write(repository_dir.path(), "dir/b.txt", "nested\n");
    repository.add(&paths(&["."])).unwrap();
    repository.commit("Initial commit").unwrap();

    write(repository_dir.path(), "a.txt", "scribbles\n");
    delete_path(&repository_dir.path().join("dir/b.txt"));
    repository.restore(&paths(&["a.txt", "dir"]), false).unwrap();

    assert_eq!(read_file(&repository_dir.path().join("a.txt")), "original\n");
    assert_eq!(read_file(&repository_dir.path().join("dir/b.txt")), "nested\n");
    assert!(repository.inspect().unwrap().report().is_clean());
}

#[rstest]
fn restore_staged_resets_the_index_to_head(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "original\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();

    write(repository_dir.path(), "a.txt", "staged edit\n");
    write(repository_dir.path(), "new.txt", "brand new\n");
    repository.add(&paths(&["a.txt", "new.txt"])).unwrap();
    repository.restore(&paths(&["a.txt", "new.txt"]), true).unwrap();

    let report = repository.inspect().unwrap().report();
    assert_eq!(report.staged().count(), 0);
    assert_eq!(report.unstaged().count(), 1);
    assert!(report.untracked.contains("new.txt"));
    assert_eq!(
        read_file(&repository_dir.path().join("a.txt")),
        "staged edit\n"
    );
}

#[rstest]
fn restore_of_an_unknown_path_fails(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "untracked.txt", "?\n");

    let error = repository
        .restore(&paths(&["untracked.txt"]), false)
        .unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::NotFound);
}

#[rstest]
fn diff_shows_unstaged_then_staged_hunks(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "f.txt", "a\nb\nc\n");
    repository.add(&paths(&["f.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();
    write(repository_dir.path(), "f.txt", "a\nx\nc\n");
    output.take();

    repository.diff(&[], false).unwrap();
    let unstaged = output.take();

    assert!(unstaged.starts_with("diff --git a/f.txt b/f.txt\nindex "));
    assert!(unstaged.ends_with(
        " 100644\n--- a/f.txt\n+++ b/f.txt\n@@ -1,3 +1,3 @@\n a\n-b\n+x\n c\n"
    ));

    repository.diff(&[], true).unwrap();
    assert_eq!(output.take(), "");

    repository.add(&paths(&["f.txt"])).unwrap();
    repository.diff(&[], false).unwrap();
    assert_eq!(output.take(), "");

    repository.diff(&paths(&["f.txt"]), true).unwrap();
    assert_eq!(output.take(), unstaged);
}

#[rstest]
fn diff_marks_new_and_deleted_files(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "gone.txt", "bye\n");
    repository.add(&paths(&["gone.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();

    delete_path(&repository_dir.path().join("gone.txt"));
    write(repository_dir.path(), "born.txt", "hi\n");
    repository.add(&paths(&["gone.txt", "born.txt"])).unwrap();
    output.take();

    repository.diff(&[], true).unwrap();
    let printed = output.take();

    assert!(printed.contains("diff --git a/born.txt b/born.txt\nnew file mode 100644\n"));
    assert!(printed.contains("--- /dev/null\n+++ b/born.txt\n"));
    assert!(printed.contains("\n+hi\n"));
    assert!(printed.contains("diff --git a/gone.txt b/gone.txt\ndeleted file mode 100644\n"));
    assert!(printed.contains("+++ /dev/null\n"));
}

#[rstest]
fn diff_marks_a_missing_final_newline(repository_dir: TempDir) {
    let (repository, output) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "a\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();
    write(repository_dir.path(), "a.txt", "a");
    output.take();

    repository.diff(&[], false).unwrap();

    assert!(output.take().ends_with(
        "--- a/a.txt\n+++ b/a.txt\n@@ -1,1 +1,1 @@\n-a\n+a\n\\ No newline at end of file\n"
    ));
}

#[rstest]
fn checkout_refuses_a_dropped_final_newline(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);
    write(repository_dir.path(), "dir/keep.txt", "keep");

    let error = repository.checkout("master", false).unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);
    assert_eq!(read_file(&repository_dir.path().join("dir/keep.txt")), "keep");
}

#[rstest]
fn add_refuses_the_repository_directory(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "a\n");

    for path in [".got", ".got/HEAD", "./.got/index"] {
        let error = repository.add(&paths(&[path])).unwrap_err();
        assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);
    }
    let error = repository
        .update_index(&paths(&[".got/HEAD"]), true)
        .unwrap_err();
    assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);

    repository.add(&paths(&["."])).unwrap();
    assert!(repository.index().entry(".got/HEAD").is_none());
    assert!(repository.index().entry(".got/index").is_none());
    assert!(repository.index().entry("a.txt").is_some());
}

#[rstest]
fn a_failed_checkout_of_a_new_branch_leaves_no_branch(repository_dir: TempDir) {
    let (repository, _) = init_repository(repository_dir.path());
    write(repository_dir.path(), "a.txt", "a\n");
    repository.add(&paths(&["a.txt"])).unwrap();
    repository.commit("Initial commit").unwrap();
    let index_path = repository_dir.path().join(".got/index");
    delete_path(&index_path);
    std::fs::create_dir_all(index_path.join("blocker")).unwrap();

    repository.checkout("topic", true).unwrap_err();

    let topic = BranchName::try_parse("topic").unwrap();
    assert!(!repository.refs().branch_exists(&topic));
    assert_eq!(
        repository.head().unwrap(),
        Head::Ref(BranchName::try_parse("master").unwrap())
    );

    delete_path(&index_path);
    assert_eq!(repository.checkout("topic", true).unwrap(), Head::Ref(topic));
}

#[rstest]
fn checkout_of_an_existing_branch_name_with_create_fails(repository_dir: TempDir) {
    let repository = two_branches(&repository_dir);

    let error = repository.checkout("master", true).unwrap_err();

    assert_eq!(ErrorKind::of(&error), ErrorKind::InvalidOperation);
    assert_eq!(
        repository.head().unwrap(),
        Head::Ref(BranchName::try_parse("topic").unwrap())
    );
}
