use std::collections::VecDeque;

use crate::errors::{Result, VqError};
use crate::model::{Mutation, MutationRecord, Version};

/// Live FIFO contents plus the version counter
///
/// Front of the queue is index 0. Every successful mutation bumps the
/// version by exactly one; a failed mutation leaves both untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<String>,
    version: Version,
}

impl Queue {
    /// Create the empty queue at version 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version (number of mutations applied so far)
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `value` to the back
    pub fn apply_enqueue(&mut self, value: impl Into<String>) {
        self.items.push_back(value.into());
        self.version += 1;
    }

    /// Remove and return the front element
    ///
    /// # Errors
    ///
    /// Returns `EmptyQueueUnderflow` if the queue is empty; the version does
    /// not advance in that case.
    pub fn apply_dequeue(&mut self) -> Result<String> {
        let front = self
            .items
            .pop_front()
            .ok_or(VqError::EmptyQueueUnderflow {
                version: self.version,
            })?;
        self.version += 1;
        Ok(front)
    }

    /// Apply a mutation and return the log record describing it
    ///
    /// # Errors
    ///
    /// Propagates `EmptyQueueUnderflow` from a dequeue.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationRecord> {
        match mutation {
            Mutation::Enqueue(value) => {
                self.apply_enqueue(value.clone());
                Ok(MutationRecord::Enqueued(value.clone()))
            }
            Mutation::Dequeue => self.apply_dequeue().map(MutationRecord::Dequeued),
        }
    }

    /// Copy of the current contents, front to back
    pub fn snapshot(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    /// Working copy of the contents for reconstruction
    pub(crate) fn working_copy(&self) -> VecDeque<String> {
        self.items.clone()
    }
}
