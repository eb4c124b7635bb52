//! Append-only record of applied mutations
//!
//! The log is the history every strategy shares. Replay reconstructs past
//! versions from it; the snapshot strategies keep it so the history stays
//! auditable even though they never read it back.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::Version;

/// What one applied mutation did
///
/// A dequeue record carries the value it removed, which is what makes the
/// step reversible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationRecord {
    Enqueued(String),
    Dequeued(String),
}

impl MutationRecord {
    /// Reverse this mutation on a working copy of the contents
    pub(crate) fn undo(&self, items: &mut VecDeque<String>) {
        match self {
            MutationRecord::Enqueued(_) => {
                items.pop_back();
            }
            MutationRecord::Dequeued(value) => items.push_front(value.clone()),
        }
    }
}

/// Ordered mutation records; entry `i` produced version `i + 1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationLog {
    records: Vec<MutationRecord>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MutationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest version this log reaches
    pub fn head(&self) -> Version {
        self.records.len() as Version
    }

    /// Records for versions in `(after, head]`, oldest first
    ///
    /// Returns `None` if `after` is beyond the head.
    pub fn since(&self, after: Version) -> Option<&[MutationRecord]> {
        let start = usize::try_from(after).ok()?;
        self.records.get(start..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationRecord> {
        self.records.iter()
    }
}
