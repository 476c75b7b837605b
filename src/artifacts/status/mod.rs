//! Working tree status inspection
//!
//! - `file_change`: change classification types and display codes
//! - `inspector`: per-entry comparison rules (index vs HEAD, workspace vs index)
//! - `status_info`: the three-way scan producing a [`status_info::StatusReport`]

pub mod file_change;
pub mod inspector;
pub mod status_info;
