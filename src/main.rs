use anyhow::Result;
use clap::{Parser, Subcommand};
use got::Repository;
use got::commands::porcelain::log::LogOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "got",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small content-addressed version-control engine",
    long_about = "got stores snapshots of a working tree as blobs, trees and commits, \
    tracks a staging index and reports the differences between HEAD, \
    the index and the working tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
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
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
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
        long_about = "This command prints the content of an object in the repository. \
        Abbreviated object IDs are accepted when they are unambiguous."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object ID to print")]
        id: String,
    },
    #[command(name = "write-tree", about = "Create a tree object from the index")]
    WriteTree,
    #[command(name = "read-tree", about = "Read a tree object into the index")]
    ReadTree {
        #[arg(index = 1, help = "The tree ID")]
        tree: String,
    },
    #[command(name = "commit-tree", about = "Create a commit object from a tree")]
    CommitTree {
        #[arg(index = 1, help = "The tree ID")]
        tree: String,
        #[arg(short, long, help = "The parent commit ID")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "update-index", about = "Register file contents in the index")]
    UpdateIndex {
        #[arg(long, help = "Also stage files the index does not know yet")]
        add: bool,
        #[arg(index = 1, required = true, num_args = 1..)]
        files: Vec<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages files and directories; directories are expanded recursively."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(name = "restore", about = "Restore working tree files or unstage them")]
    Restore {
        #[arg(short = 'S', long, help = "Reset the index entries to HEAD instead")]
        staged: bool,
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(short, long, help = "Give the output in the short format")]
        short: bool,
    },
    #[command(
        name = "diff",
        about = "Show changes between the index and the working tree",
        long_about = "Without --cached, compares the index with the working tree. \
        With --cached, compares HEAD with the index."
    )]
    Diff {
        #[arg(long, alias = "staged", help = "Compare HEAD with the index")]
        cached: bool,
        #[arg(index = 1, num_args = 0..)]
        paths: Vec<String>,
    },
    #[command(name = "log", about = "Show the commit history")]
    Log {
        #[arg(index = 1, help = "Revision to start from (defaults to HEAD)")]
        revision: Option<String>,
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits")]
        max_count: Option<usize>,
        #[arg(long, help = "Print one line per commit")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "List, create or delete branches",
        long_about = "Without arguments, lists branches. With a name, creates a branch at the start point (HEAD by default)."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create or delete")]
        name: Option<String>,
        #[arg(index = 2, help = "Where the new branch points")]
        start: Option<String>,
        #[arg(short, long, requires = "name", help = "Delete the branch")]
        delete: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit"
    )]
    Checkout {
        #[arg(short = 'b', help = "Create the branch before switching to it")]
        create: bool,
        #[arg(index = 1)]
        target: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::var("GOT_NO_COLOR").is_ok_and(|value| !value.is_empty() && value != "0") {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    if let Commands::Init { path } = &cli.command {
        let root = path.as_ref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
        std::fs::create_dir_all(&root)?;
        Repository::init(&root, Box::new(std::io::stdout()))?;
        return Ok(());
    }

    let repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
    let from_pwd = |paths: &[String]| -> Vec<String> {
        paths
            .iter()
            .map(|path| absolute(&pwd, path).to_string_lossy().into_owned())
            .collect()
    };

    match cli.command {
        Commands::Init { .. } => {}
        Commands::HashObject { write, file } => {
            repository.hash_object(&absolute(&pwd, &file).to_string_lossy(), write)?;
        }
        Commands::CatFile { id } => repository.cat_file(&id)?,
        Commands::WriteTree => {
            repository.write_tree()?;
        }
        Commands::ReadTree { tree } => repository.read_tree(&tree)?,
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            repository.commit_tree(&tree, parent.as_deref(), &message)?;
        }
        Commands::UpdateIndex { add, files } => repository.update_index(&from_pwd(&files), add)?,
        Commands::Add { paths } => repository.add(&from_pwd(&paths))?,
        Commands::Restore { staged, paths } => repository.restore(&from_pwd(&paths), staged)?,
        Commands::Commit { message } => {
            repository.commit(&message)?;
        }
        Commands::Status { short } => {
            repository.status(short)?;
        }
        Commands::Diff { cached, paths } => repository.diff(&from_pwd(&paths), cached)?,
        Commands::Log {
            revision,
            max_count,
            oneline,
        } => {
            repository.log(&LogOptions {
                revision,
                max_count,
                oneline,
            })?;
        }
        Commands::Branch {
            name: Some(name),
            delete: true,
            ..
        } => {
            repository.delete_branch(&name)?;
        }
        Commands::Branch {
            name: Some(name),
            start,
            ..
        } => {
            repository.create_branch(&name, start.as_deref())?;
        }
        Commands::Branch { name: None, .. } => {
            repository.list_branches()?;
        }
        Commands::Checkout { create, target } => {
            repository.checkout(&target, create)?;
        }
    }

    Ok(())
}

fn absolute(pwd: &Path, path: &str) -> PathBuf {
    pwd.join(path)
}
