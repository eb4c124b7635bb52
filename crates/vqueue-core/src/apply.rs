//! Single-step apply function
//!
//! `apply()` is the canonical entry point for executing one parsed
//! [`Operation`] against a timeline through a strategy. Batch orchestration
//! (validation up front, ordering, termination) lives in `vqueue-engine`;
//! this function only knows how to execute one step.
//!
//! ## Atomicity Contract
//!
//! - A mutation either advances the version by exactly one or leaves the
//!   timeline unchanged
//! - A query never changes the timeline
//! - Errors are typed; nothing panics on bad input
//!
//! ## Example
//!
//! ```
//! use vqueue_core::{apply, Operation, Timeline, strategy::Replay};
//!
//! let mut timeline = Timeline::new();
//! let mut strategy = Replay::new();
//!
//! apply(&mut timeline, &mut strategy, &Operation::Enqueue { value: "1".into() }).unwrap();
//! let outcome = apply(&mut timeline, &mut strategy, &Operation::Query { version: 1 }).unwrap();
//!
//! assert_eq!(outcome.query_result().unwrap().elements, vec!["1".to_string()]);
//! ```

use serde::Serialize;

use crate::errors::Result;
use crate::model::{Mutation, Operation, Version};
use crate::strategy::Strategy;
use crate::timeline::Timeline;

/// Contents observed by one query, front to back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub version: Version,
    pub elements: Vec<String>,
}

/// What executing one operation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A mutation was applied and produced this version
    Mutated(Version),
    /// A query was answered
    Queried(QueryResult),
}

impl StepOutcome {
    pub fn query_result(&self) -> Option<&QueryResult> {
        match self {
            StepOutcome::Queried(result) => Some(result),
            StepOutcome::Mutated(_) => None,
        }
    }

    pub fn into_query_result(self) -> Option<QueryResult> {
        match self {
            StepOutcome::Queried(result) => Some(result),
            StepOutcome::Mutated(_) => None,
        }
    }
}

/// Execute one operation
///
/// # Errors
///
/// * `EmptyQueueUnderflow` - Dequeue on an empty queue
/// * `VersionNotFound` - Query for a version never reached
/// * `StorageIo` / `SnapshotCorrupt` / `Serialization` - DiskSnapshot storage failure
pub fn apply(
    timeline: &mut Timeline,
    strategy: &mut dyn Strategy,
    op: &Operation,
) -> Result<StepOutcome> {
    match op {
        Operation::Enqueue { value } => {
            let mutation = Mutation::Enqueue(value.clone());
            strategy.apply(timeline, &mutation).map(StepOutcome::Mutated)
        }
        Operation::Dequeue => strategy
            .apply(timeline, &Mutation::Dequeue)
            .map(StepOutcome::Mutated),
        Operation::Query { version } => {
            let elements = strategy.query(timeline, *version)?;
            tracing::info!(
                version = *version,
                strategy = %strategy.kind(),
                "The queue at version {} is {:?}",
                version,
                elements
            );
            Ok(StepOutcome::Queried(QueryResult {
                version: *version,
                elements,
            }))
        }
    }
}
