use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Version;

/// Full queue contents per reached version
///
/// A fresh table already holds version 0 (the empty queue), so `p 0` is
/// answerable before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTable {
    versions: BTreeMap<Version, Vec<String>>,
}

impl SnapshotTable {
    /// Table seeded with the empty queue at version 0
    pub fn new() -> Self {
        let mut versions = BTreeMap::new();
        versions.insert(0, Vec::new());
        Self { versions }
    }

    /// Record the contents reached at `version`
    ///
    /// Versions are written once; a second write for the same version
    /// replaces the first, which only happens if a caller replays history.
    pub fn insert(&mut self, version: Version, contents: Vec<String>) {
        self.versions.insert(version, contents);
    }

    pub fn get(&self, version: Version) -> Option<&[String]> {
        self.versions.get(&version).map(Vec::as_slice)
    }

    /// Highest version stored
    pub fn latest(&self) -> Option<Version> {
        self.versions.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Total number of stored elements across all versions
    pub fn element_count(&self) -> usize {
        self.versions.values().map(Vec::len).sum()
    }
}

impl Default for SnapshotTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_holds_version_zero() {
        let table = SnapshotTable::new();
        assert_eq!(table.get(0), Some(&[][..]));
        assert_eq!(table.latest(), Some(0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SnapshotTable::new();
        table.insert(1, vec!["1".to_string()]);
        table.insert(2, vec!["1".to_string(), "4".to_string()]);

        assert_eq!(table.get(2), Some(&["1".to_string(), "4".to_string()][..]));
        assert_eq!(table.get(3), None);
        assert_eq!(table.latest(), Some(2));
        assert_eq!(table.element_count(), 3);
    }

    #[test]
    fn test_json_keys_survive_round_trip() {
        let mut table = SnapshotTable::new();
        table.insert(10, vec!["x".to_string()]);

        let json = serde_json::to_string(&table).unwrap();
        let decoded: SnapshotTable = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, table);
    }
}
