use crate::common::command::{repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::*;
use rstest::{fixture, rstest};

const HELLO_OID: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";

#[fixture]
fn empty_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

fn ls_files(dir: &std::path::Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = run_twig_command(dir, &["ls-files", "--stage"])
        .assert()
        .success();

    Ok(String::from_utf8(output.get_output().stdout.clone())?
        .lines()
        .map(str::to_string)
        .collect())
}

#[rstest]
fn add_single_file_to_index_successfully(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("README.md"), "hello".to_string()));

    run_twig_command(dir.path(), &["add", "README.md"])
        .assert()
        .success()
        .stdout(format!("Stored object as: {HELLO_OID} README.md\n"));

    assert_eq!(
        ls_files(dir.path())?,
        vec![format!("100644 {HELLO_OID} README.md")]
    );
    assert!(
        dir.path()
            .join(".twig/objects/aa/f4c61ddcc5e8a2dabede0f3b482cd9aea9434d")
            .is_file()
    );

    Ok(())
}

#[rstest]
fn adding_unchanged_file_is_reported_as_already_staged(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    write_file(FileSpec::new(dir.path().join(&file_name), file_content));

    run_twig_command(dir.path(), &["add", &file_name])
        .assert()
        .success();
    let index_before = std::fs::read(dir.path().join(".twig/index"))?;

    run_twig_command(dir.path(), &["add", &file_name])
        .assert()
        .success()
        .stdout(format!("'{file_name}' is already staged\n"));

    assert_eq!(std::fs::read(dir.path().join(".twig/index"))?, index_before);

    Ok(())
}

#[rstest]
fn restaging_modified_file_replaces_its_entry(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("README.md"), "hello".to_string()));
    write_file(FileSpec::new(dir.path().join("notes.txt"), "notes".to_string()));
    run_twig_command(dir.path(), &["add", "README.md", "notes.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(
        dir.path().join("README.md"),
        "hello again".to_string(),
    ));
    run_twig_command(dir.path(), &["add", "README.md"])
        .assert()
        .success();

    let entries = ls_files(dir.path())?;
    assert_eq!(entries.len(), 2);
    assert!(entries[0].ends_with(" README.md"));
    assert!(!entries[0].contains(HELLO_OID));
    assert!(entries[1].ends_with(" notes.txt"));

    Ok(())
}

#[rstest]
fn add_files_from_nested_directories_to_index_successfully(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.path().join("a/2.txt"), "two".to_string()));
    write_file(FileSpec::new(dir.path().join("a/b/3.txt"), "three".to_string()));

    run_twig_command(dir.path(), &["add", "."])
        .assert()
        .success();

    let output = run_twig_command(dir.path(), &["ls-files"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert_eq!(stdout, "1.txt\na/2.txt\na/b/3.txt\n");

    Ok(())
}

#[rstest]
fn add_from_subdirectory_uses_repository_relative_paths(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("a/b/3.txt"), "three".to_string()));

    run_twig_command(&dir.path().join("a"), &["add", "b/3.txt"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(" a/b/3.txt\n"));

    Ok(())
}

#[rstest]
fn adding_a_non_existent_file_fails_and_stages_nothing(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("real.txt"), "real".to_string()));

    run_twig_command(dir.path(), &["add", "real.txt", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any files"));

    assert!(ls_files(dir.path())?.is_empty());

    Ok(())
}

#[rstest]
fn adding_a_path_with_whitespace_fails(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir;
    write_file(FileSpec::new(dir.path().join("with space.txt"), "x".to_string()));

    run_twig_command(dir.path(), &["add", "with space.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("whitespace"));

    Ok(())
}
