use crate::common::file::{write_file, FileSpec};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one committed snapshot: `1.txt`, `a/2.txt`, `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_tgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    tgit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_tgit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("tgit").expect("Failed to find tgit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// `tgit commit` with a fixed author so commit hashes are reproducible
pub fn tgit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_tgit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", &"fake_user".to_string()),
        ("GIT_AUTHOR_EMAIL", &"fake_email@email.com".to_string()),
        ("GIT_AUTHOR_DATE", &"2023-01-01 12:00:00 +0000".to_string()),
    ]);
    cmd
}

/// Current tip commit hash, resolved through HEAD's symbolic ref
pub fn head_commit_sha(dir: &Path) -> Option<String> {
    let head_content = std::fs::read_to_string(dir.join(".tgit").join("HEAD")).ok()?;
    let ref_path = head_content.trim().strip_prefix("ref: ")?;

    let tip = std::fs::read_to_string(dir.join(".tgit").join(ref_path)).ok()?;
    let tip = tip.trim();
    if tip.is_empty() {
        None
    } else {
        Some(tip.to_string())
    }
}

/// Raw bytes of the staging index file
pub fn index_contents(dir: &Path) -> Vec<u8> {
    std::fs::read(dir.join(".tgit").join("index")).expect("Failed to read index file")
}
