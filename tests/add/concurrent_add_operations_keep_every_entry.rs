use crate::common::command::{repository_dir, run_twig_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use rstest::rstest;
use std::collections::BTreeSet;

const WRITERS: usize = 8;

#[rstest]
fn concurrent_add_operations_keep_every_entry(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let files = write_generated_files(repository_dir.path(), WRITERS);

    // One process per file, all racing on the same index
    let handles = files
        .iter()
        .map(|file| {
            let dir = repository_dir.path().to_path_buf();
            let file_name = file
                .path
                .file_name()
                .expect("generated file has a name")
                .to_string_lossy()
                .to_string();

            std::thread::spawn(move || {
                run_twig_command(&dir, &["add", &file_name])
                    .assert()
                    .success();
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().expect("add process panicked");
    }

    let output = run_twig_command(repository_dir.path(), &["ls-files"])
        .assert()
        .success();
    let staged = String::from_utf8(output.get_output().stdout.clone())?
        .lines()
        .map(str::to_string)
        .collect::<BTreeSet<_>>();
    let expected = files
        .iter()
        .map(|file| file.path.file_name().unwrap().to_string_lossy().to_string())
        .collect::<BTreeSet<_>>();

    assert_eq!(staged, expected);

    Ok(())
}
