//! vqueue Core - versioned FIFO queue kernel
//!
//! This crate provides the data structures and operations for a queue that
//! remembers every version it passed through:
//! - Operation parsing and validation for `e`/`d`/`p` command lines
//! - The live queue, its version counter and the mutation log
//! - Snapshot tables and the persistence seam used by disk-backed history
//! - Three interchangeable reconstruction strategies (replay, memory, disk)
//! - Error and logging facilities shared by the other crates

pub mod apply;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;
pub mod strategy;
pub mod timeline;

// Re-export commonly used types
pub use apply::{apply, QueryResult, StepOutcome};
pub use errors::{ExError, ExErrorKind, Result, VqError};
pub use model::operation::parse_batch;
pub use model::{Mutation, MutationLog, MutationRecord, Operation, Queue, Version};
pub use snapshot::{SnapshotTable, TableLease, TablePersistence};
pub use strategy::{DiskSnapshot, MemorySnapshot, Replay, Strategy, StrategyKind};
pub use timeline::Timeline;
