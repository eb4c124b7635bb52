//! Error helpers for vqueue-store
//!
//! Maps I/O and codec failures onto the core `VqError` taxonomy.

use vqueue_core::errors::VqError;

/// Result type alias shared with vqueue-core
pub type Result<T> = std::result::Result<T, VqError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> VqError {
    VqError::StorageIo {
        op: operation.to_string(),
        message: err.to_string(),
    }
}

/// Create a snapshot corruption error
pub fn corrupt_snapshot(reason: impl Into<String>) -> VqError {
    VqError::SnapshotCorrupt {
        message: reason.into(),
    }
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(err: serde_json::Error) -> VqError {
    VqError::Serialization {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqueue_core::ExErrorKind;

    #[test]
    fn test_io_error_maps_to_storage_kind() {
        let err = io_error(
            "read_table",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ExErrorKind::StorageIo);
        assert!(err.to_string().contains("read_table"));
    }

    #[test]
    fn test_corrupt_snapshot_kind() {
        assert_eq!(
            corrupt_snapshot("digest mismatch").kind(),
            ExErrorKind::SnapshotCorrupt
        );
    }
}
