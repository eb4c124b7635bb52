//! In-memory table storage
//!
//! Keeps the encoded envelope bytes rather than a live table, so it goes
//! through the same codec as the filesystem store and never shares state
//! with the lease that loaded it.

use vqueue_core::{SnapshotTable, TablePersistence, VqError};

use crate::codec;
use crate::errors::Result;

#[derive(Debug, Default)]
pub struct MemoryTableStore {
    bytes: Option<Vec<u8>>,
    saves: usize,
    loads: usize,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Number of successful loads
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Size of the stored envelope in bytes
    pub fn stored_len(&self) -> usize {
        self.bytes.as_ref().map_or(0, Vec::len)
    }
}

impl TablePersistence for MemoryTableStore {
    fn save(&mut self, table: &SnapshotTable) -> Result<()> {
        self.bytes = Some(codec::encode(table)?);
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<SnapshotTable> {
        let bytes = self.bytes.as_deref().ok_or_else(|| VqError::StorageIo {
            op: "read_table".to_string(),
            message: "no table has been saved".to_string(),
        })?;
        let table = codec::decode(bytes)?;
        self.loads += 1;
        Ok(table)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
