//! Staging index file format
//!
//! The index is the durable record of paths marked for the next commit.
//!
//! ## File Format
//!
//! Plain text, one record per line:
//!
//! ```text
//! <mode> <oid> <path> <mtime>
//! ```
//!
//! Paths are repository-relative and '/'-separated. Readers tolerate trailing
//! blank lines and skip malformed records (too few fields) with a diagnostic
//! rather than aborting the whole read.

pub mod entry_mode;
pub mod index_entry;
