use crate::errors::Result;
use crate::snapshot::SnapshotTable;

/// External storage for a snapshot table
///
/// Implementations hold the table outside the engine's working memory.
/// `save` replaces whatever was stored before; `load` returns the last
/// saved table.
pub trait TablePersistence {
    /// Persist the table, replacing the previous copy
    ///
    /// # Errors
    ///
    /// Returns `StorageIo` or `Serialization` if the table cannot be written.
    /// A failed save must leave the previously saved table intact.
    fn save(&mut self, table: &SnapshotTable) -> Result<()>;

    /// Read back the last saved table
    ///
    /// # Errors
    ///
    /// Returns `StorageIo` if nothing can be read, `SnapshotCorrupt` if what
    /// was read is not a valid table.
    fn load(&mut self) -> Result<SnapshotTable>;

    /// Short backend name for log fields
    fn describe(&self) -> String;
}
