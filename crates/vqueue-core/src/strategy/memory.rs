use crate::errors::Result;
use crate::model::{Mutation, Version};
use crate::snapshot::SnapshotTable;
use crate::strategy::{version_not_found, Strategy, StrategyKind};
use crate::timeline::Timeline;

/// Holds a full copy of every version in memory
///
/// Writes pay an O(n) copy, queries are a map lookup. Past snapshots are
/// never modified after they are written.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    table: SnapshotTable,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self {
            table: SnapshotTable::new(),
        }
    }

    pub fn table(&self) -> &SnapshotTable {
        &self.table
    }
}

impl Strategy for MemorySnapshot {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Memory
    }

    fn apply(&mut self, timeline: &mut Timeline, mutation: &Mutation) -> Result<Version> {
        let version = timeline.apply(mutation)?;
        self.table.insert(version, timeline.queue().snapshot());
        Ok(version)
    }

    fn query(&mut self, timeline: &Timeline, version: Version) -> Result<Vec<String>> {
        self.table
            .get(version)
            .map(<[String]>::to_vec)
            .ok_or_else(|| version_not_found(version, timeline))
    }
}
