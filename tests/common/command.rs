use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_got_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three\n".to_string(),
    ));

    run_got_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    got_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_got_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("got").expect("Failed to find got binary");
    cmd.envs(vec![
        ("GOT_NO_COLOR", "1"),
        ("GOT_AUTHOR_NAME", "Jane Tester"),
        ("GOT_AUTHOR_EMAIL", "jane@example.com"),
        ("GOT_AUTHOR_DATE", "2024-03-01 12:00:00 +0200"),
    ]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    cmd.args(args);
    cmd
}

pub fn got_commit(dir: &Path, message: &str) -> Command {
    run_got_command(dir, &["commit", "-m", message])
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}
