use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{
    head_commit_sha, init_repository_dir, repository_dir, run_tgit_command, tgit_commit,
};
use common::file::{bump_mtime, count_stored_objects, write_file, FileSpec};

#[rstest]
fn first_commit_is_marked_as_root(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    run_tgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    tgit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    // the branch ref now holds the commit hash
    let tip = head_commit_sha(repository_dir.path()).expect("branch should have a tip");
    assert_eq!(tip.len(), 40);

    Ok(())
}

#[rstest]
fn second_commit_links_to_its_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let first_tip = head_commit_sha(repository_dir.path()).expect("first commit exists");

    let path = repository_dir.path().join("1.txt");
    write_file(FileSpec::new(path.clone(), "one, revised".to_string()));
    bump_mtime(&path, 2_000_000_000);
    run_tgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    tgit_commit(repository_dir.path(), "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] Second commit\n$")?);

    let second_tip = head_commit_sha(repository_dir.path()).expect("second commit exists");
    let payload = run_tgit_command(repository_dir.path(), &["cat-file", "-p", &second_tip])
        .assert()
        .success();
    let payload = String::from_utf8(payload.get_output().stdout.clone())?;
    assert!(payload.contains(&format!("parent {}", first_tip)));

    Ok(())
}

#[rstest]
fn committing_an_empty_index_fails(repository_dir: TempDir) {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    tgit_commit(repository_dir.path(), "Nothing here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing staged for commit"));

    // the failed attempt created no object and moved no ref
    assert_eq!(count_stored_objects(repository_dir.path()), 0);
    assert_eq!(head_commit_sha(repository_dir.path()), None);
}

#[rstest]
fn unchanged_snapshot_creates_no_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let tip_before = head_commit_sha(repository_dir.path());
    let objects_before = count_stored_objects(repository_dir.path());

    tgit_commit(repository_dir.path(), "Same snapshot again")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "nothing to commit, working tree clean",
        ));

    assert_eq!(head_commit_sha(repository_dir.path()), tip_before);
    assert_eq!(count_stored_objects(repository_dir.path()), objects_before);

    Ok(())
}

#[rstest]
fn missing_author_identity_fails_before_any_ref_moves(repository_dir: TempDir) {
    run_tgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    run_tgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let mut cmd = run_tgit_command(repository_dir.path(), &["commit", "-m", "No author"]);
    cmd.env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .env_remove("GIT_AUTHOR_DATE");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("author identity unknown"));

    assert_eq!(head_commit_sha(repository_dir.path()), None);
}

#[rstest]
fn identical_snapshots_produce_identical_commit_hashes(
) -> Result<(), Box<dyn std::error::Error>> {
    let build = || -> Result<String, Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        run_tgit_command(dir.path(), &["init"]).assert().success();
        write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
        write_file(FileSpec::new(
            dir.path().join("a").join("2.txt"),
            "two".to_string(),
        ));
        run_tgit_command(dir.path(), &["add", "."]).assert().success();
        tgit_commit(dir.path(), "Initial commit").assert().success();

        Ok(head_commit_sha(dir.path()).expect("commit exists"))
    };

    // same content, same author, same fixed date
    assert_eq!(build()?, build()?);

    Ok(())
}
