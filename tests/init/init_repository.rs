use crate::common::command::{repository_dir, run_twig_command};
use assert_fs::TempDir;
use assert_fs::prelude::PathChild;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let twig_dir = repository_dir.path().canonicalize()?.join(".twig");

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty twig repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(twig_dir.display().to_string()));

    assert!(twig_dir.join("objects").is_dir());
    assert!(twig_dir.join("refs").join("heads").is_dir());
    assert!(twig_dir.join("refs").join("tags").is_dir());
    assert!(twig_dir.join("index").is_file());
    assert_eq!(
        std::fs::read_to_string(twig_dir.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}

#[rstest]
fn init_repository_at_given_path(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.child("nested").child("project");

    run_twig_command(
        repository_dir.path(),
        &["init", &target.path().display().to_string()],
    )
    .assert()
    .success();

    assert!(target.path().join(".twig").join("HEAD").is_file());
    assert!(!repository_dir.path().join(".twig").exists());

    Ok(())
}

#[rstest]
fn init_existing_repository_is_reported_not_failed(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("twig repository already exists"));

    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a twig repository"));

    Ok(())
}
