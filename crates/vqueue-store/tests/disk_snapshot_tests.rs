//! DiskSnapshot over the filesystem store
//!
//! ## Scenarios Covered
//!
//! 1. Every mutation is visible on disk before the next operation
//! 2. Serialize → deserialize is the identity on table contents
//! 3. A corrupted file aborts the next step with a typed error
//! 4. A failed step leaves the file at the last complete version

use std::fs;

use tempfile::TempDir;
use vqueue_core::{DiskSnapshot, Mutation, SnapshotTable, Strategy, TablePersistence, Timeline, VqError};
use vqueue_store::{codec, FsTableStore};

fn enqueue(value: &str) -> Mutation {
    Mutation::Enqueue(value.to_string())
}

fn open_store(dir: &TempDir) -> FsTableStore {
    FsTableStore::new(dir.path()).unwrap()
}

#[test]
fn test_each_mutation_is_persisted_before_next_step() {
    // GIVEN a disk strategy over a directory we can inspect
    let dir = TempDir::new().unwrap();
    let mut strategy = DiskSnapshot::new(Box::new(open_store(&dir))).unwrap();
    let mut timeline = Timeline::new();

    // WHEN mutations are applied one by one
    for (i, value) in ["1", "4"].iter().enumerate() {
        strategy.apply(&mut timeline, &enqueue(value)).unwrap();

        // THEN the file already holds the version just produced
        let on_disk = open_store(&dir).load().unwrap();
        assert_eq!(on_disk.latest(), Some(i as u64 + 1));
    }

    strategy.apply(&mut timeline, &Mutation::Dequeue).unwrap();
    let on_disk = open_store(&dir).load().unwrap();
    assert_eq!(on_disk.get(2), Some(&["1".to_string(), "4".to_string()][..]));
    assert_eq!(on_disk.get(3), Some(&["4".to_string()][..]));
}

#[test]
fn test_round_trip_is_identity() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let mut table = SnapshotTable::new();
    table.insert(1, vec!["with space?".to_string()]);
    table.insert(2, vec!["ünïcode".to_string(), "\"quoted\"".to_string()]);
    table.insert(3, Vec::new());

    store.save(&table).unwrap();
    assert_eq!(store.load().unwrap(), table);
}

#[test]
fn test_corrupted_file_aborts_next_query() {
    // GIVEN a store with two versions
    let dir = TempDir::new().unwrap();
    let mut strategy = DiskSnapshot::new(Box::new(open_store(&dir))).unwrap();
    let mut timeline = Timeline::new();
    strategy.apply(&mut timeline, &enqueue("a")).unwrap();
    strategy.apply(&mut timeline, &enqueue("b")).unwrap();

    // WHEN the file is tampered with behind the engine's back
    let path = dir.path().join(vqueue_store::fs::TABLE_FILE_NAME);
    let tampered = fs::read_to_string(&path).unwrap().replacen("\"b\"", "\"z\"", 1);
    fs::write(&path, tampered).unwrap();

    // THEN the next query fails as corrupt instead of answering
    let err = strategy.query(&timeline, 2).unwrap_err();
    assert!(matches!(err, VqError::SnapshotCorrupt { .. }));
}

#[test]
fn test_missing_file_is_storage_error_and_queue_untouched() {
    let dir = TempDir::new().unwrap();
    let mut strategy = DiskSnapshot::new(Box::new(open_store(&dir))).unwrap();
    let mut timeline = Timeline::new();

    fs::remove_file(dir.path().join(vqueue_store::fs::TABLE_FILE_NAME)).unwrap();

    let err = strategy.apply(&mut timeline, &enqueue("a")).unwrap_err();
    assert!(matches!(err, VqError::StorageIo { .. }));
    assert_eq!(timeline.version(), 0);
}

#[test]
fn test_underflow_keeps_file_at_last_version() {
    let dir = TempDir::new().unwrap();
    let mut strategy = DiskSnapshot::new(Box::new(open_store(&dir))).unwrap();
    let mut timeline = Timeline::new();
    strategy.apply(&mut timeline, &enqueue("a")).unwrap();
    strategy.apply(&mut timeline, &Mutation::Dequeue).unwrap();

    let before = fs::read(dir.path().join(vqueue_store::fs::TABLE_FILE_NAME)).unwrap();
    let err = strategy.apply(&mut timeline, &Mutation::Dequeue).unwrap_err();
    let after = fs::read(dir.path().join(vqueue_store::fs::TABLE_FILE_NAME)).unwrap();

    assert!(matches!(err, VqError::EmptyQueueUnderflow { version: 2 }));
    assert_eq!(before, after);
    assert_eq!(codec::decode(&after).unwrap().latest(), Some(2));
}
