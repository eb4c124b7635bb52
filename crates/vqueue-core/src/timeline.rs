use crate::errors::Result;
use crate::model::{Mutation, MutationLog, MutationRecord, Queue, Version};

/// Live queue plus the log of every mutation that produced it
///
/// This is the state every strategy shares. It only moves forward: a
/// mutation either succeeds and appends exactly one log record, or fails and
/// changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    queue: Queue,
    log: MutationLog,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn log(&self) -> &MutationLog {
        &self.log
    }

    pub fn version(&self) -> Version {
        self.queue.version()
    }

    /// Apply a mutation to the live queue and log it
    ///
    /// Returns the version the mutation produced.
    ///
    /// # Errors
    ///
    /// Propagates `EmptyQueueUnderflow`; neither queue nor log change.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<Version> {
        let record = self.queue.apply(mutation)?;
        self.log.push(record);
        debug_assert_eq!(self.log.head(), self.queue.version());
        Ok(self.queue.version())
    }

    /// Records for versions after `version`, oldest first
    pub fn records_since(&self, version: Version) -> Option<&[MutationRecord]> {
        self.log.since(version)
    }
}
