//! Repository error taxonomy
//!
//! Every failure mode that callers may want to react to is a variant here.
//! Errors are carried inside `anyhow::Error` for propagation and context, and
//! can be recovered with `downcast_ref::<RepositoryError>()`.
//!
//! Two propagation classes exist:
//! - Precondition errors (`NotARepository`, `PathNotFound`, `EmptyIndex`, ...)
//!   abort only the current operation and leave repository state unchanged.
//! - Object-graph errors (`ObjectNotFound`, `BlobRead`) signal corruption or a
//!   logic bug and are fatal to the surrounding build; no ref is advanced.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("fatal: not a tgit repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("fatal: pathspec '{0}' did not match any files")]
    PathNotFound(PathBuf),

    #[error("fatal: pathspec '{0}' is not in the staging index")]
    NotStaged(PathBuf),

    #[error("fatal: not removing '{0}': is a directory, use --recursive")]
    RecursionRequired(PathBuf),

    #[error("nothing staged for commit (staging index is empty)")]
    EmptyIndex,

    #[error("author identity unknown: set user.name and user.email in .tgit/config")]
    MissingAuthor,

    #[error("object {0} not found in object database")]
    ObjectNotFound(String),

    #[error("unable to read blob {oid} referenced by '{path}'")]
    BlobRead { oid: String, path: PathBuf },

    #[error("malformed {kind} record: {detail}")]
    MalformedObjectRecord { kind: &'static str, detail: String },

    #[error("malformed index record: {0}")]
    MalformedIndexRecord(String),
}
