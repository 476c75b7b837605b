//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: initialize a new repository
//! - `add`: stage files
//! - `rm`: unstage files
//! - `commit`: snapshot the staging index
//! - `status`: classify every path against the index and the last commit

pub mod add;
pub mod commit;
pub mod init;
pub mod rm;
pub mod status;
