use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{index_contents, init_repository_dir, run_tgit_command};

#[rstest]
fn removing_a_staged_file_drops_its_index_entry(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_tgit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed: 1.txt"));

    let index = String::from_utf8(index_contents(repository_dir.path()))?;
    assert!(!index.contains("1.txt"));
    // the working tree file survives
    assert!(repository_dir.path().join("1.txt").is_file());

    Ok(())
}

#[rstest]
fn removing_an_unstaged_path_fails(init_repository_dir: TempDir) {
    run_tgit_command(init_repository_dir.path(), &["rm", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not in the staging index"));
}

#[rstest]
fn removing_a_directory_requires_the_recursive_flag(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let before = index_contents(repository_dir.path());

    run_tgit_command(repository_dir.path(), &["rm", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--recursive"));

    // a refused removal leaves the index untouched
    assert_eq!(index_contents(repository_dir.path()), before);

    Ok(())
}

#[rstest]
fn recursive_removal_unstages_the_whole_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_tgit_command(repository_dir.path(), &["rm", "-r", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed: a/2.txt"))
        .stdout(predicate::str::contains("removed: a/b/3.txt"));

    let index = String::from_utf8(index_contents(repository_dir.path()))?;
    assert_eq!(index.lines().count(), 1);
    assert!(index.contains("1.txt"));

    Ok(())
}

#[rstest]
fn failed_argument_rolls_back_the_whole_invocation(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let before = index_contents(repository_dir.path());

    run_tgit_command(repository_dir.path(), &["rm", "1.txt", "missing.txt"])
        .assert()
        .failure();

    assert_eq!(index_contents(repository_dir.path()), before);

    Ok(())
}
