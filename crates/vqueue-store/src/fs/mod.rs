//! Filesystem-backed snapshot table storage
//!
//! Provides:
//! - Atomic temp→rename writes so a crash never leaves a half-written table
//! - A table store rooted in a caller-chosen or temporary directory

mod atomic;
mod table_store;

pub use table_store::{FsTableStore, TABLE_FILE_NAME};
