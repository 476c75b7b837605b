use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::status::status_info::Status;
use crate::errors::RepositoryError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository metadata directory
pub const REPOSITORY_DIR: &str = ".tgit";

/// The repository context: one value tying all the areas together
///
/// Holds no cached view of HEAD or the current branch; refs are re-read from
/// disk on demand so concurrent writers are observed.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: Config,
}

impl Repository {
    fn open(path: &Path, writer: Box<dyn std::io::Write>) -> Self {
        let metadata_path = path.join(REPOSITORY_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.to_path_buf().into_boxed_path());
        let refs = Refs::new(metadata_path.clone().into_boxed_path());
        let config = Config::new(metadata_path.join("config").into_boxed_path());

        Repository {
            path: path.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            config,
        }
    }

    /// Locate the repository root by walking up from `start`
    ///
    /// The first ancestor (including `start` itself) containing a `.tgit`
    /// directory wins; running out of ancestors is `NotARepository`.
    pub fn discover(start: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = Path::new(start).canonicalize()?;

        let mut candidate = Some(start.as_path());
        while let Some(path) = candidate {
            if path.join(REPOSITORY_DIR).is_dir() {
                return Ok(Self::open(path, writer));
            }
            candidate = path.parent();
        }

        Err(RepositoryError::NotARepository(start).into())
    }

    /// Create the repository skeleton at `path` and open it
    ///
    /// Seeds `.tgit` with an empty object store, an empty index, a default
    /// config and HEAD pointing at an unborn default branch. Initializing an
    /// already-initialized directory is an error.
    pub fn init_at(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let metadata_path = path.join(REPOSITORY_DIR);
        if metadata_path.exists() {
            anyhow::bail!(
                "Repository already initialized at {}",
                metadata_path.display()
            );
        }

        let repository = Self::open(&path, writer);

        std::fs::create_dir_all(repository.database.objects_path())?;
        for refs_dir in [
            repository.refs.heads_path(),
            repository.refs.tags_path(),
            repository.refs.remotes_path(),
        ] {
            std::fs::create_dir_all(refs_dir)?;
        }

        repository.config.write_defaults()?;

        let branch = repository.config.default_branch_name()?;
        repository.refs.set_head(&branch)?;
        repository.refs.init_branch(&branch)?;

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status_engine(&'_ self) -> Status<'_> {
        Status::new(self)
    }
}
