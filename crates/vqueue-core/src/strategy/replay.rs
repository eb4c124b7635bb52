use crate::errors::Result;
use crate::model::{Mutation, Version};
use crate::strategy::{version_not_found, Strategy, StrategyKind};
use crate::timeline::Timeline;

/// Reconstructs past versions by undoing logged mutations
///
/// Keeps no snapshots. A query for version V at current version C copies the
/// live contents and walks the records for `(V, C]` newest first, popping
/// the back for every enqueue and pushing the removed value back on the
/// front for every dequeue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replay;

impl Replay {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for Replay {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Replay
    }

    fn apply(&mut self, timeline: &mut Timeline, mutation: &Mutation) -> Result<Version> {
        timeline.apply(mutation)
    }

    fn query(&mut self, timeline: &Timeline, version: Version) -> Result<Vec<String>> {
        let records = timeline
            .records_since(version)
            .ok_or_else(|| version_not_found(version, timeline))?;

        let mut items = timeline.queue().working_copy();
        for record in records.iter().rev() {
            record.undo(&mut items);
        }
        Ok(items.into())
    }
}
