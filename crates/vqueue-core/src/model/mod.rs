pub mod mutation_log;
pub mod operation;
pub mod queue;

pub use mutation_log::{MutationLog, MutationRecord};
pub use operation::{Mutation, Operation};
pub use queue::Queue;

/// Number of mutations applied since engine start
///
/// Version 0 is the empty queue before any mutation.
pub type Version = u64;
