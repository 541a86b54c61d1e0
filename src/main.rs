use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::commands::porcelain::branch::BranchAction;
use twig::commands::porcelain::log::LogOptions;
use twig::errors::Error;

use clap::{Parser, Subcommand};

const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "twig stores file snapshots as hashed, compressed objects, \
    stages them in an index, and records commits on branches.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stores the given files (directories are walked recursively) \
        in the object database and records them in the index."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot on the current branch",
        long_about = "This command writes a tree for the index, a commit pointing at it, and advances \
        the current branch. Author identity comes from TWIG_AUTHOR_NAME and TWIG_AUTHOR_EMAIL \
        unless --author is given."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, help = "Override the author, as 'Name <email>'")]
        author: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show the commit history of the current branch",
        long_about = "This command lists commits reachable from the current branch, newest first."
    )]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
        #[arg(long = "abbrev-commit", help = "Show abbreviated commit ids")]
        abbrev_commit: bool,
    },
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "Without arguments this command lists branches, marking the current one. \
        With a name it creates a branch at the current commit; with -d it deletes one."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create", conflicts_with = "delete")]
        name: Option<String>,
        #[arg(short = 'd', long = "delete", help = "The branch to delete")]
        delete: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command prints the object id of a file's content and, with -w, stores it."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw content of an object. \
        It accepts a full or abbreviated hash, a branch name, or HEAD."
    )]
    CatFile {
        #[arg(index = 1, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "ls-files",
        about = "Show the entries of the index",
        long_about = "This command lists staged paths in index order."
    )]
    LsFiles {
        #[arg(short, long, help = "Show mode and object id for each entry")]
        stage: bool,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree, or of the tree a commit points at."
    )]
    LsTree {
        #[arg(index = 1, default_value = "HEAD", help = "The tree or commit to list")]
        object: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<Error>() {
            Some(error) if error.is_precondition() => {
                println!("{error}");
                ExitCode::SUCCESS
            }
            _ => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { path } => {
            let path = path.unwrap_or(pwd);
            let repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init()
        }
        Commands::Add { paths } => open(&pwd)?.add(&paths),
        Commands::Commit { message, author } => open(&pwd)?
            .commit(&message, author.as_deref())
            .map(|_| ()),
        Commands::Log {
            oneline,
            abbrev_commit,
        } => open(&pwd)?.log(&LogOptions {
            oneline,
            abbrev_commit,
        }),
        Commands::Branch { name, delete } => {
            let action = match (name, delete) {
                (_, Some(name)) => BranchAction::Delete(name),
                (Some(name), None) => BranchAction::Create(name),
                (None, None) => BranchAction::List,
            };

            open(&pwd)?.branch(&action)
        }
        Commands::HashObject { write, file } => open(&pwd)?.hash_object(&file, write),
        Commands::CatFile { object } => open(&pwd)?.cat_file(&object),
        Commands::LsFiles { stage } => open(&pwd)?.ls_files(stage),
        Commands::LsTree { object } => open(&pwd)?.ls_tree(&object),
    }
}

fn open(pwd: &Path) -> anyhow::Result<Repository> {
    Repository::discover(pwd, Box::new(std::io::stdout()))
}
