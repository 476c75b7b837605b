use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{repository_dir, run_tgit_command};
use common::file::{count_stored_objects, write_file, FileSpec};

#[rstest]
fn hash_object_prints_the_content_hash_without_storing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));

    run_tgit_command(repository_dir.path(), &["hash-object", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);

    assert_eq!(count_stored_objects(repository_dir.path()), 0);

    Ok(())
}

#[rstest]
fn hash_object_with_write_round_trips_through_cat_file(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "hello world\n".to_string(),
    ));

    let output = run_tgit_command(repository_dir.path(), &["hash-object", "-w", "1.txt"])
        .assert()
        .success();
    let oid = String::from_utf8(output.get_output().stdout.clone())?;
    let oid = oid.trim();

    assert_eq!(count_stored_objects(repository_dir.path()), 1);

    let payload = run_tgit_command(repository_dir.path(), &["cat-file", "-p", oid])
        .assert()
        .success();
    let payload = String::from_utf8(payload.get_output().stdout.clone())?;
    assert_eq!(payload, "hello world\n");

    Ok(())
}

#[rstest]
fn cat_file_on_a_corrupted_object_reports_corruption(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    // plant garbage bytes at a well-formed sharded object path
    let oid = "0123456789abcdef0123456789abcdef01234567";
    let shard = repository_dir
        .path()
        .join(".tgit")
        .join("objects")
        .join(&oid[..2]);
    std::fs::create_dir_all(&shard)?;
    std::fs::write(shard.join(&oid[2..]), b"this is not zlib data")?;

    run_tgit_command(repository_dir.path(), &["cat-file", "-p", oid])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("corrupt object {oid}")));

    Ok(())
}

#[rstest]
fn cat_file_on_a_missing_object_fails(repository_dir: TempDir) {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_tgit_command(
        repository_dir.path(),
        &["cat-file", "-p", "0123456789012345678901234567890123456789"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}
