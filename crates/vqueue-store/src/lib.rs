//! vqueue Store - persistence backends for snapshot tables
//!
//! Provides:
//! - `FsTableStore`: one JSON file per store, written atomically, guarded by
//!   a SHA-256 digest
//! - `MemoryTableStore`: encoded bytes kept off the engine's table, for tests
//!   and dry runs
//! - Error helpers mapping I/O and codec failures onto `VqError`

pub mod codec;
pub mod errors;
pub mod fs;
pub mod memory;

pub use fs::FsTableStore;
pub use memory::MemoryTableStore;
