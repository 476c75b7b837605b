//! Plumbing commands (low-level object access)
//!
//! ## Commands
//!
//! - `hash-object`: compute an object ID and optionally store the blob
//! - `cat-file`: decompress and print a stored object

pub mod cat_file;
pub mod hash_object;
