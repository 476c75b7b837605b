//! Command implementations
//!
//! Commands are `impl Repository` blocks, one file per command, in two
//! layers:
//!
//! - `porcelain`: the user-facing workflow commands (init, add, rm, commit,
//!   status)
//! - `plumbing`: direct object-store access (hash-object, cat-file)

pub mod plumbing;
pub mod porcelain;
