//! Snapshot tables and their persistence seam
//!
//! ## Responsibilities
//!
//! - `SnapshotTable`: version → full contents map used by both snapshot
//!   strategies
//! - `TablePersistence`: the save/load collaborator behind DiskSnapshot
//! - `TableLease`: scoped load → use → save acquisition of a persisted table
//!
//! ## Non-Responsibilities
//!
//! - Concrete storage backends (handled by `vqueue-store`)

pub mod lease;
pub mod persistence;
pub mod table;

pub use lease::TableLease;
pub use persistence::TablePersistence;
pub use table::SnapshotTable;
