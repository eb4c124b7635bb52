use thiserror::Error;

use crate::model::Version;

/// Result type alias using VqError
pub type Result<T> = std::result::Result<T, VqError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the vqueue system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    MalformedOperation,
    UnknownOperationKind,

    // Execution
    EmptyQueueUnderflow,
    VersionNotFound,
    EngineTerminated,

    // Storage
    StorageIo,
    SnapshotCorrupt,
    Serialization,

    // Configuration
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedOperation => "ERR_MALFORMED_OPERATION",
            ExErrorKind::UnknownOperationKind => "ERR_UNKNOWN_OPERATION_KIND",
            ExErrorKind::EmptyQueueUnderflow => "ERR_EMPTY_QUEUE_UNDERFLOW",
            ExErrorKind::VersionNotFound => "ERR_VERSION_NOT_FOUND",
            ExErrorKind::EngineTerminated => "ERR_ENGINE_TERMINATED",
            ExErrorKind::StorageIo => "ERR_STORAGE_IO",
            ExErrorKind::SnapshotCorrupt => "ERR_SNAPSHOT_CORRUPT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind is raised before any operation is applied
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedOperation | ExErrorKind::UnknownOperationKind
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing layer knew:
/// the operation name, the input line, the version involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    line: Option<usize>,
    version: Option<Version>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            line: None,
            version: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add input line context (1-based)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add version context
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the input line context, if any
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the version context, if any
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(version) = self.version {
            write!(f, " (version: {})", version)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for versioned queue operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VqError {
    // ===== Validation Errors =====
    /// Line does not follow the `e <value>` / `d` / `p <version>` grammar
    #[error("Malformed operation on line {line}: {reason} ({text:?})")]
    MalformedOperation {
        line: usize,
        text: String,
        reason: String,
    },

    /// Leading token is not one of `e`, `d`, `p`
    #[error("Unknown operation kind {kind:?} on line {line}")]
    UnknownOperationKind { line: usize, kind: String },

    // ===== Execution Errors =====
    #[error("Cannot dequeue from an empty queue at version {version}")]
    EmptyQueueUnderflow { version: Version },

    #[error("Version {requested} not found (current version is {current})")]
    VersionNotFound { requested: Version, current: Version },

    #[error("Engine already terminated; a new engine is required for another batch")]
    EngineTerminated,

    // ===== Storage Errors =====
    #[error("Storage I/O failed during {op}: {message}")]
    StorageIo { op: String, message: String },

    #[error("Snapshot table is corrupt: {message}")]
    SnapshotCorrupt { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ===== Generic Errors =====
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl VqError {
    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            VqError::MalformedOperation { .. } => ExErrorKind::MalformedOperation,
            VqError::UnknownOperationKind { .. } => ExErrorKind::UnknownOperationKind,
            VqError::EmptyQueueUnderflow { .. } => ExErrorKind::EmptyQueueUnderflow,
            VqError::VersionNotFound { .. } => ExErrorKind::VersionNotFound,
            VqError::EngineTerminated => ExErrorKind::EngineTerminated,
            VqError::StorageIo { .. } => ExErrorKind::StorageIo,
            VqError::SnapshotCorrupt { .. } => ExErrorKind::SnapshotCorrupt,
            VqError::Serialization { .. } => ExErrorKind::Serialization,
            VqError::Config { .. } => ExErrorKind::Config,
            VqError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

impl From<VqError> for ExError {
    fn from(err: VqError) -> Self {
        let kind = err.kind();
        match err {
            VqError::MalformedOperation { line, text, reason } => ExError::new(kind)
                .with_op("parse_operation")
                .with_line(line)
                .with_message(format!("{}: {:?}", reason, text)),

            VqError::UnknownOperationKind { line, kind: token } => ExError::new(kind)
                .with_op("parse_operation")
                .with_line(line)
                .with_message(format!("Unknown operation kind {:?}", token)),

            VqError::EmptyQueueUnderflow { version } => ExError::new(kind)
                .with_op("dequeue")
                .with_version(version)
                .with_message("Queue is empty"),

            VqError::VersionNotFound { requested, current } => ExError::new(kind)
                .with_op("query")
                .with_version(requested)
                .with_message(format!("Version never reached (current is {})", current)),

            VqError::EngineTerminated => ExError::new(kind)
                .with_op("run_batch")
                .with_message("Engine already terminated"),

            VqError::StorageIo { op, message } => ExError::new(kind).with_op(op).with_message(message),

            VqError::SnapshotCorrupt { message } => ExError::new(kind)
                .with_op("load_table")
                .with_message(message),

            VqError::Serialization { message }
            | VqError::Config { message }
            | VqError::Internal { message } => ExError::new(kind).with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let kinds = [
            ExErrorKind::MalformedOperation,
            ExErrorKind::UnknownOperationKind,
            ExErrorKind::EmptyQueueUnderflow,
            ExErrorKind::VersionNotFound,
            ExErrorKind::EngineTerminated,
            ExErrorKind::StorageIo,
            ExErrorKind::SnapshotCorrupt,
            ExErrorKind::Serialization,
            ExErrorKind::Config,
            ExErrorKind::Internal,
        ];

        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::VersionNotFound)
            .with_op("query")
            .with_version(7)
            .with_message("never reached");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_VERSION_NOT_FOUND]"));
        assert!(rendered.contains("'query'"));
        assert!(rendered.contains("(version: 7)"));
    }

    #[test]
    fn test_validation_kinds() {
        assert!(ExErrorKind::MalformedOperation.is_validation());
        assert!(ExErrorKind::UnknownOperationKind.is_validation());
        assert!(!ExErrorKind::EmptyQueueUnderflow.is_validation());
        assert!(!ExErrorKind::StorageIo.is_validation());
    }
}
