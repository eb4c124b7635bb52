//! Scoped acquisition of a persisted snapshot table
//!
//! A lease loads the table, hands it to the caller, and writes it back only
//! when [`TableLease::commit`] is called. Dropping a lease without committing
//! discards the in-memory copy and leaves storage at its last committed
//! state, so an error path can never persist a half-applied step.

use crate::errors::Result;
use crate::snapshot::{SnapshotTable, TablePersistence};

pub struct TableLease<'a> {
    store: &'a mut dyn TablePersistence,
    table: SnapshotTable,
}

impl<'a> TableLease<'a> {
    /// Load the table from storage
    ///
    /// # Errors
    ///
    /// Propagates the store's load error; nothing is held on failure.
    pub fn acquire(store: &'a mut dyn TablePersistence) -> Result<Self> {
        let table = store.load()?;
        tracing::debug!(
            backend = %store.describe(),
            table_len = table.len(),
            "snapshot table loaded"
        );
        Ok(Self { store, table })
    }

    pub fn table(&self) -> &SnapshotTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut SnapshotTable {
        &mut self.table
    }

    /// Write the table back and release the in-memory copy
    ///
    /// # Errors
    ///
    /// Propagates the store's save error.
    pub fn commit(mut self) -> Result<()> {
        self.store.save(&self.table)?;
        tracing::debug!(
            backend = %self.store.describe(),
            table_len = self.table.len(),
            "snapshot table saved"
        );
        Ok(())
    }
}
