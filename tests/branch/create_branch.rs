use crate::common::command::{
    get_head_commit_sha, init_repository_dir, read_branch, repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_branch_at_current_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head = get_head_commit_sha(dir.path())?;

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout(format!("Created branch feature at {}\n", &head[..7]));

    assert_eq!(read_branch(dir.path(), "feature")?, head);
    assert_eq!(read_branch(dir.path(), "master")?, head);

    Ok(())
}

#[rstest]
#[case("feature/login")]
#[case("bugfix/auth/token")]
#[case("release-1.0")]
fn create_branch_with_valid_name(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", name])
        .assert()
        .success();

    assert_eq!(
        read_branch(dir.path(), name)?,
        get_head_commit_sha(dir.path())?
    );

    Ok(())
}

#[rstest]
#[case(".hidden")]
#[case("feature/")]
#[case("a..b")]
#[case("topic.lock")]
#[case("what?")]
#[case("@{upstream}")]
fn create_branch_with_invalid_name(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    Ok(())
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a branch named 'feature' already exists",
        ));

    Ok(())
}

#[rstest]
fn create_branch_without_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();

    run_twig_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("Created branch feature (no commits yet)\n");

    assert_eq!(read_branch(dir.path(), "feature")?, "");

    Ok(())
}
