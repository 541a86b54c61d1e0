use crate::common::command::{init_repository_dir, read_branch, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_twig_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    let branch_path = repository_dir
        .path()
        .join(".twig")
        .join("refs")
        .join("heads")
        .join("feature");
    assert!(branch_path.exists());
    let branch_oid = read_branch(repository_dir.path(), "feature")?;

    run_twig_command(repository_dir.path(), &["branch", "-d", "feature"])
        .assert()
        .success()
        .stdout(format!("Deleted branch feature (was {}).\n", &branch_oid[..7]));

    assert!(!branch_path.exists());

    Ok(())
}

#[rstest]
fn delete_nonexistent_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_twig_command(repository_dir.path(), &["branch", "-d", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found: branch 'nonexistent'"));

    Ok(())
}

#[rstest]
fn delete_branch_twice_fails_the_second_time(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    run_twig_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["branch", "-d", "feature"])
        .assert()
        .success();
    run_twig_command(repository_dir.path(), &["branch", "-d", "feature"])
        .assert()
        .failure();

    Ok(())
}

#[rstest]
fn delete_current_branch_is_refused(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_twig_command(repository_dir.path(), &["branch", "-d", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currently checked out"));

    assert!(
        repository_dir
            .path()
            .join(".twig/refs/heads/master")
            .is_file()
    );

    Ok(())
}

#[rstest]
fn delete_hierarchical_branch_prunes_empty_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    run_twig_command(repository_dir.path(), &["branch", "feature/login"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["branch", "-d", "feature/login"])
        .assert()
        .success();

    assert!(
        !repository_dir
            .path()
            .join(".twig/refs/heads/feature")
            .exists()
    );

    Ok(())
}
