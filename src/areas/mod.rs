//! Stateful repository areas
//!
//! Each area owns one slice of on-disk state:
//!
//! - `workspace`: the user's working tree
//! - `index`: the staging area (`.tgit/index`)
//! - `database`: the content-addressable object store (`.tgit/objects`)
//! - `refs`: HEAD and branch ref files (`.tgit/refs`)
//! - `config`: author identity and default branch (`.tgit/config`)
//! - `repository`: the context object tying the areas together

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
