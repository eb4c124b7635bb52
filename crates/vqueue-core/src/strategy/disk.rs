use crate::errors::Result;
use crate::model::{Mutation, Version};
use crate::snapshot::{SnapshotTable, TableLease, TablePersistence};
use crate::strategy::{version_not_found, Strategy, StrategyKind};
use crate::timeline::Timeline;

/// Keeps every snapshot in external storage
///
/// Between operations no table is resident. Each mutation and each query
/// takes a [`TableLease`]: load, use, save. A lease that is dropped on an
/// error path is never saved, so storage always holds the last complete
/// step. Storage failures are returned as-is and not retried.
///
/// A failed save happens after the timeline has advanced, so the timeline
/// is then one version ahead of storage. Callers must treat any storage
/// error as fatal for the timeline; retrying the step would diverge.
pub struct DiskSnapshot {
    store: Box<dyn TablePersistence>,
}

impl DiskSnapshot {
    /// Take ownership of `store` and persist the version 0 table
    ///
    /// # Errors
    ///
    /// Propagates the store's save error.
    pub fn new(mut store: Box<dyn TablePersistence>) -> Result<Self> {
        store.save(&SnapshotTable::new())?;
        tracing::debug!(backend = %store.describe(), "disk snapshot store initialized");
        Ok(Self { store })
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }
}

impl std::fmt::Debug for DiskSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskSnapshot")
            .field("store", &self.store.describe())
            .finish()
    }
}

impl Strategy for DiskSnapshot {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Disk
    }

    fn apply(&mut self, timeline: &mut Timeline, mutation: &Mutation) -> Result<Version> {
        // Load before mutating so a failed load leaves the queue untouched.
        let mut lease = TableLease::acquire(self.store.as_mut())?;
        let version = timeline.apply(mutation)?;
        lease
            .table_mut()
            .insert(version, timeline.queue().snapshot());
        lease.commit()?;
        Ok(version)
    }

    fn query(&mut self, timeline: &Timeline, version: Version) -> Result<Vec<String>> {
        let lease = TableLease::acquire(self.store.as_mut())?;
        let contents = lease
            .table()
            .get(version)
            .map(<[String]>::to_vec)
            .ok_or_else(|| version_not_found(version, timeline))?;
        lease.commit()?;
        Ok(contents)
    }
}
