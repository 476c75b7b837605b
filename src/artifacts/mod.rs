//! Core data structures and algorithms
//!
//! - `branch`: branch name parsing and validation
//! - `database`: flattened tree entry type shared by status and tree walks
//! - `index`: staging index entry and file mode types
//! - `objects`: stored object kinds (blob, tree, commit) and their codecs
//! - `status`: three-way change classification

pub mod branch;
pub mod database;
pub mod index;
pub mod objects;
pub mod status;
