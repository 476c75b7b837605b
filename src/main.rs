use anyhow::Result;
use clap::{Parser, Subcommand};
use tgit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "tgit",
    version = "0.1.0",
    about = "A minimal version control engine",
    long_about = "A minimal version control engine built around a \
    content-addressable object store, a staging index and immutable commit \
    snapshots.",
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
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the given files or directories, storing their content \
        in the object database and recording them in the staging index."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Remove files from the staging index",
        long_about = "This command removes the given files from the staging index. \
        Working tree files are not touched."
    )]
    Rm {
        #[arg(short, long, help = "Remove staged directory contents recursively")]
        recursive: bool,
        #[arg(index = 1, required = true, help = "Files or directories to unstage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging index as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command classifies every path against the staging index and the \
        last commit: staged, unstaged and untracked changes."
    )]
    Status {
        #[arg(long, help = "Use the long, sectioned output format")]
        long: bool,
        #[arg(index = 1, help = "Restrict the report to this path")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the decompressed payload of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::init_at(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::init_at(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init().await?
        }
        Commands::Add { paths } => open_repository()?.add(paths).await?,
        Commands::Rm { recursive, paths } => open_repository()?.rm(paths, *recursive).await?,
        Commands::Commit { message } => open_repository()?.commit(message.as_str()).await?,
        Commands::Status { long, path } => {
            open_repository()?.status(path.as_deref(), *long).await?
        }
        Commands::CatFile { sha } => open_repository()?.cat_file(sha)?,
        Commands::HashObject { write, file } => open_repository()?.hash_object(file, *write)?,
    }

    Ok(())
}
