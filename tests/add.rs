use assert_fs::TempDir;
use predicates::prelude::predicate;
use predicates::Predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{index_contents, repository_dir, run_tgit_command};
use common::file::{bump_mtime, count_stored_objects, write_file, FileSpec};

fn init_empty(repository_dir: &TempDir) {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
}

#[rstest]
fn staging_a_new_file_stores_its_blob(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_empty(&repository_dir);
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));

    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added: 1.txt"));

    // the index holds one well-formed record for the path
    let index = String::from_utf8(index_contents(repository_dir.path()))?;
    assert!(predicate::str::is_match(r"^100644 [0-9a-f]{40} 1\.txt \d+\n$")?.eval(&index));

    // the blob landed at its sharded path
    let output = run_tgit_command(repository_dir.path(), &["hash-object", "1.txt"])
        .assert()
        .success();
    let oid = String::from_utf8(output.get_output().stdout.clone())?;
    let oid = oid.trim();
    let blob_path = repository_dir
        .path()
        .join(".tgit")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..]);
    assert!(blob_path.is_file());

    Ok(())
}

#[rstest]
fn restaging_an_unchanged_file_is_reported_as_already_staged(repository_dir: TempDir) {
    init_empty(&repository_dir);
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));

    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added: 1.txt"));

    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already staged: 1.txt"));
}

#[rstest]
fn touched_but_identical_file_is_still_already_staged(repository_dir: TempDir) {
    init_empty(&repository_dir);
    let path = repository_dir.path().join("1.txt");
    write_file(FileSpec::new(path.clone(), "one".to_string()));

    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    // new mtime forces a rehash, identical content keeps the entry
    bump_mtime(&path, 2_000_000_000);
    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already staged: 1.txt"));
}

#[rstest]
fn staging_modified_content_is_reported_as_updated(repository_dir: TempDir) {
    init_empty(&repository_dir);
    let path = repository_dir.path().join("1.txt");
    write_file(FileSpec::new(path.clone(), "one".to_string()));

    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(path.clone(), "one, modified".to_string()));
    bump_mtime(&path, 2_000_000_000);
    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated: 1.txt"));
}

#[rstest]
fn staging_a_directory_expands_recursively(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_empty(&repository_dir);
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_tgit_command(repository_dir.path(), &["add", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added: a/2.txt"))
        .stdout(predicate::str::contains("added: a/b/3.txt"));

    let index = String::from_utf8(index_contents(repository_dir.path()))?;
    assert_eq!(index.lines().count(), 2);

    Ok(())
}

#[rstest]
fn staging_a_nonexistent_path_fails(repository_dir: TempDir) {
    init_empty(&repository_dir);

    run_tgit_command(repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any files"));
}

#[rstest]
fn symlinks_are_never_staged(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    init_empty(&repository_dir);
    write_file(FileSpec::new(
        repository_dir.path().join("real.txt"),
        "real".to_string(),
    ));
    std::os::unix::fs::symlink(
        repository_dir.path().join("real.txt"),
        repository_dir.path().join("link.txt"),
    )?;

    run_tgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    // the recursive walk staged the regular file and skipped the link
    let index = String::from_utf8(index_contents(repository_dir.path()))?;
    assert_eq!(index.lines().count(), 1);
    assert!(index.contains("real.txt"));
    assert!(!index.contains("link.txt"));

    // naming the link directly stages nothing either
    run_tgit_command(repository_dir.path(), &["add", "link.txt"])
        .assert()
        .success();
    assert_eq!(index_contents(repository_dir.path()).len(), index.len());

    // and the status walk does not report it
    let output = run_tgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(!stdout.contains("link.txt"));

    Ok(())
}

#[rstest]
fn identical_content_is_stored_once(repository_dir: TempDir) {
    init_empty(&repository_dir);
    write_file(FileSpec::new(
        repository_dir.path().join("first.txt"),
        "same bytes".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("second.txt"),
        "same bytes".to_string(),
    ));

    run_tgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    assert_eq!(count_stored_objects(repository_dir.path()), 1);
}
