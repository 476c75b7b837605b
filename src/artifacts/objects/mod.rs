//! Stored object types and operations
//!
//! Everything in the object database is one of three kinds, all addressed by
//! the same content hash:
//!
//! - **Blob**: raw file bytes, unmodified
//! - **Tree**: one directory level, newline-joined `<mode> <kind> <name>\0<hash>`
//!   records sorted by name
//! - **Commit**: tree snapshot plus authorship metadata and an optional parent
//!
//! Payloads carry no framing header; the expected kind is supplied by the
//! caller at deserialization time.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
