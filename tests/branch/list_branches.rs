use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn list_branches(dir: &std::path::Path) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_twig_command(dir, &["branch"]).assert().success();

    Ok(String::from_utf8(output.get_output().stdout.clone())?)
}

#[rstest]
fn list_branches_with_only_master(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(list_branches(init_repository_dir.path())?, "* master\n");

    Ok(())
}

#[rstest]
fn list_branches_sorted_with_current_marked(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    for name in ["zebra", "alpha", "feature/signup", "feature/login"] {
        run_twig_command(repository_dir.path(), &["branch", name])
            .assert()
            .success();
    }

    assert_eq!(
        list_branches(repository_dir.path())?,
        "  alpha\n  feature/login\n  feature/signup\n* master\n  zebra\n"
    );

    Ok(())
}

#[rstest]
fn deleted_branch_is_no_longer_listed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    run_twig_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_twig_command(repository_dir.path(), &["branch", "-d", "feature"])
        .assert()
        .success();

    assert_eq!(list_branches(repository_dir.path())?, "* master\n");

    Ok(())
}
