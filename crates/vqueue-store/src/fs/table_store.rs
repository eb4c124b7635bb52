use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vqueue_core::{SnapshotTable, TablePersistence};

use crate::codec;
use crate::errors::{io_error, Result};
use crate::fs::atomic::atomic_write;

/// File name of the persisted table inside the store directory
pub const TABLE_FILE_NAME: &str = "queue_state.json";

/// Snapshot table persisted as a single file
///
/// Every `save` rewrites the whole table atomically; every `load` reads and
/// verifies it. When created with [`FsTableStore::temporary`] the directory
/// is removed when the store is dropped.
#[derive(Debug)]
pub struct FsTableStore {
    root: PathBuf,
    // Held only for its Drop, which removes the directory.
    _temp: Option<TempDir>,
}

impl FsTableStore {
    /// Open a store rooted at `root`, creating the directory if needed
    ///
    /// An existing table file is left in place and will be overwritten by
    /// the first save.
    ///
    /// # Errors
    ///
    /// Returns `StorageIo` if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| io_error("create_store_dir", e))?;
        Ok(Self { root, _temp: None })
    }

    /// Open a store in a fresh process-unique temporary directory
    ///
    /// # Errors
    ///
    /// Returns `StorageIo` if the directory cannot be created.
    pub fn temporary() -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(&format!("vqueue_snapshots_{}_", std::process::id()))
            .tempdir()
            .map_err(|e| io_error("create_temp_store_dir", e))?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table file
    pub fn table_path(&self) -> PathBuf {
        self.root.join(TABLE_FILE_NAME)
    }
}

impl TablePersistence for FsTableStore {
    fn save(&mut self, table: &SnapshotTable) -> Result<()> {
        let bytes = codec::encode(table)?;
        atomic_write(&self.table_path(), &bytes)?;
        tracing::debug!(
            path = %self.table_path().display(),
            bytes = bytes.len(),
            versions = table.len(),
            "Snapshot table written"
        );
        Ok(())
    }

    fn load(&mut self) -> Result<SnapshotTable> {
        let bytes = fs::read(self.table_path()).map_err(|e| io_error("read_table", e))?;
        codec::decode(&bytes)
    }

    fn describe(&self) -> String {
        format!("fs:{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqueue_core::VqError;

    fn setup_store() -> (FsTableStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FsTableStore::new(temp_dir.path().join("snapshots")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_save_load_round_trip() {
        let (mut store, _dir) = setup_store();
        let mut table = SnapshotTable::new();
        table.insert(1, vec!["a".to_string()]);

        store.save(&table).unwrap();

        assert_eq!(store.load().unwrap(), table);
    }

    #[test]
    fn test_load_before_save_is_storage_error() {
        let (mut store, _dir) = setup_store();
        let err = store.load().unwrap_err();
        assert!(matches!(err, VqError::StorageIo { ref op, .. } if op == "read_table"));
    }

    #[test]
    fn test_temporary_store_is_removed_on_drop() {
        let store = FsTableStore::temporary().unwrap();
        let root = store.root().to_path_buf();
        assert!(root.exists());

        drop(store);
        assert!(!root.exists());
    }

    #[test]
    fn test_describe_names_directory() {
        let (store, _dir) = setup_store();
        assert!(store.describe().starts_with("fs:"));
        assert!(store.describe().ends_with("snapshots"));
    }
}
