use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use common::command::{got_commit, init_repository_dir, repository_dir, run_got_command, stdout_of};
use common::file::{generated_lines, read_file};
use predicates::Predicate;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sha1::{Digest, Sha1};

mod common;

#[rstest]
fn init_creates_the_repository_layout(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty got repository in ",
        ))
        .stdout(predicate::str::contains(".got"));

    let got_dir = repository_dir.path().join(".got");
    assert!(got_dir.join("objects").is_dir());
    assert!(got_dir.join("refs").join("heads").is_dir());
    assert_eq!(read_file(&got_dir.join("HEAD")), "");
    assert_eq!(read_file(&got_dir.join("index")), "");

    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[rstest]
fn init_accepts_a_target_directory(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("nested/project/.got").is_dir());
}

#[rstest]
fn hash_object_prints_the_sha1_of_the_content(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let content = generated_lines(4);
    repository_dir.child("notes.txt").write_str(&content).unwrap();
    let expected = format!("{:x}\n", Sha1::digest(content.as_bytes()));

    let printed = stdout_of(&mut run_got_command(
        repository_dir.path(),
        &["hash-object", "notes.txt"],
    ));
    assert_eq!(printed, expected);
    assert!(!repository_dir.path().join(".got/objects").join(&expected[..2]).exists());

    run_got_command(repository_dir.path(), &["hash-object", "-w", "notes.txt"])
        .assert()
        .success();
    let printed = stdout_of(&mut run_got_command(
        repository_dir.path(),
        &["cat-file", "-p", &expected[..8]],
    ));
    assert_eq!(printed, format!("{content}\n"));
}

#[rstest]
fn commit_reports_the_branch_and_short_id(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("a.txt").write_str("a\n").unwrap();
    run_got_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    got_commit(repository_dir.path(), "Add a")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master \(root-commit\) [0-9a-f]{7}\] Add a\n$").unwrap());

    repository_dir.child("a.txt").write_str("b\n").unwrap();
    run_got_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    got_commit(repository_dir.path(), "Change a")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master [0-9a-f]{7}\] Change a\n$").unwrap());
}

#[rstest]
fn status_runs_from_a_subdirectory(init_repository_dir: TempDir) {
    init_repository_dir.child("a/2.txt").write_str("changed\n").unwrap();
    init_repository_dir.child("a/b/new.txt").write_str("new\n").unwrap();

    let printed = stdout_of(&mut run_got_command(
        &init_repository_dir.path().join("a").join("b"),
        &["status", "--short"],
    ));

    assert_eq!(printed, " M a/2.txt\n?? a/b/new.txt\n");
}

#[rstest]
fn add_from_a_subdirectory_is_relative_to_it(init_repository_dir: TempDir) {
    init_repository_dir.child("a/b/new.txt").write_str("new\n").unwrap();

    run_got_command(&init_repository_dir.path().join("a"), &["add", "b"])
        .assert()
        .success();

    let printed = stdout_of(&mut run_got_command(
        init_repository_dir.path(),
        &["status", "-s"],
    ));
    assert_eq!(printed, "A  a/b/new.txt\n");
}

#[rstest]
fn log_prints_medium_and_oneline_formats(init_repository_dir: TempDir) {
    init_repository_dir.child("1.txt").write_str("uno\n").unwrap();
    run_got_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    got_commit(init_repository_dir.path(), "Second commit")
        .assert()
        .success();

    let medium = stdout_of(&mut run_got_command(init_repository_dir.path(), &["log"]));
    let lines = medium.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("commit "));
    assert!(lines[0].ends_with(" (HEAD -> master)"));
    assert_eq!(lines[1], "Author: Jane Tester <jane@example.com>");
    assert_eq!(lines[2], "Date:   Fri Mar 1 12:00:00 2024 +0200");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "    Second commit");
    assert_eq!(lines[5], "");
    assert!(lines[6].starts_with("commit "));

    let oneline = stdout_of(&mut run_got_command(
        init_repository_dir.path(),
        &["log", "--oneline", "-n", "1"],
    ));
    assert!(
        predicate::str::is_match(r"^[0-9a-f]{7} \(HEAD -> master\) Second commit\n$")
            .unwrap()
            .eval(oneline.as_str())
    );
}

#[rstest]
fn branch_and_checkout_round_trip(init_repository_dir: TempDir) {
    run_got_command(init_repository_dir.path(), &["checkout", "-b", "topic"])
        .assert()
        .success()
        .stdout("Switched to a new branch 'topic'\n");

    init_repository_dir.child("topic.txt").write_str("topic\n").unwrap();
    run_got_command(init_repository_dir.path(), &["add", "topic.txt"])
        .assert()
        .success();
    got_commit(init_repository_dir.path(), "Topic work")
        .assert()
        .success();

    run_got_command(init_repository_dir.path(), &["branch"])
        .assert()
        .success()
        .stdout("  master\n* topic\n");

    run_got_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("Switched to branch 'master'\n");
    assert!(!init_repository_dir.path().join("topic.txt").exists());

    run_got_command(init_repository_dir.path(), &["branch", "-d", "topic"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Deleted branch topic (was "));

    run_got_command(init_repository_dir.path(), &["branch", "-d", "master"])
        .assert()
        .failure();
}

#[rstest]
fn diff_prints_a_unified_diff(init_repository_dir: TempDir) {
    init_repository_dir.child("1.txt").write_str("one\nmore\n").unwrap();

    run_got_command(init_repository_dir.path(), &["diff"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("diff --git a/1.txt b/1.txt\n"))
        .stdout(predicate::str::contains("@@ -1,1 +1,2 @@\n one\n+more\n"));

    run_got_command(init_repository_dir.path(), &["diff", "--cached"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn plumbing_commands_build_a_commit(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("dir/file.txt").write_str("plumbing\n").unwrap();
    run_got_command(repository_dir.path(), &["update-index", "--add", "dir/file.txt"])
        .assert()
        .success();

    let tree_id = stdout_of(&mut run_got_command(repository_dir.path(), &["write-tree"]));
    let tree_id = tree_id.trim();
    let commit_id = stdout_of(&mut run_got_command(
        repository_dir.path(),
        &["commit-tree", tree_id, "-m", "Plumbed"],
    ));

    run_got_command(repository_dir.path(), &["cat-file", "-p", commit_id.trim()])
        .assert()
        .success()
        .stdout(predicate::str::contains(tree_id))
        .stdout(predicate::str::contains("Plumbed"));
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_got_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository"));
}

#[rstest]
fn plumbing_rejects_object_ids_that_are_not_hex(init_repository_dir: TempDir) {
    for args in [
        ["cat-file", "-p", "aé"].as_slice(),
        ["read-tree", "zz"].as_slice(),
        ["commit-tree", "aé", "-m", "Broken"].as_slice(),
    ] {
        run_got_command(init_repository_dir.path(), args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not an object id"));
    }
}
