//! Snapshot table envelope
//!
//! Tables are stored as a JSON envelope carrying a format version and the
//! SHA-256 digest of the canonical table encoding. Decoding recomputes the
//! digest, so a truncated or hand-edited file is reported as corrupt rather
//! than silently answering queries with wrong contents.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vqueue_core::SnapshotTable;

use crate::errors::{corrupt_snapshot, from_serde_json, Result};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    digest: String,
    table: SnapshotTable,
}

/// Hex SHA-256 of the table's canonical JSON encoding
///
/// `SnapshotTable` is backed by an ordered map, so equal tables always
/// encode to the same bytes.
pub fn table_digest(table: &SnapshotTable) -> Result<String> {
    let canonical = serde_json::to_vec(table).map_err(from_serde_json)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}

/// Encode a table into envelope bytes
pub fn encode(table: &SnapshotTable) -> Result<Vec<u8>> {
    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        digest: table_digest(table)?,
        table: table.clone(),
    };
    serde_json::to_vec(&envelope).map_err(from_serde_json)
}

/// Decode and verify envelope bytes
///
/// # Errors
///
/// Returns `SnapshotCorrupt` for undecodable bytes, an unknown format
/// version, or a digest mismatch.
pub fn decode(bytes: &[u8]) -> Result<SnapshotTable> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| corrupt_snapshot(format!("undecodable table: {}", e)))?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(corrupt_snapshot(format!(
            "unsupported format_version {} (expected {})",
            envelope.format_version, FORMAT_VERSION
        )));
    }

    let actual = table_digest(&envelope.table)?;
    if actual != envelope.digest {
        return Err(corrupt_snapshot(format!(
            "digest mismatch: recorded {}, computed {}",
            envelope.digest, actual
        )));
    }

    Ok(envelope.table)
}
