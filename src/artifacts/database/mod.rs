//! Shared database entry types

pub mod database_entry;
