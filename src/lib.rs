//! # Trophy
//!
//! Backup and restore for a personal fishing and hunting log.
//!
//! Trophy keeps catches, places and gear in a local `SQLite` store and can
//! snapshot the whole dataset into a portable, versioned JSON document. The
//! same document can later be imported back, record by record, without
//! trusting its contents: a bad row is reported and skipped, a bad document
//! is rejected before anything is written.
//!
//! ## Features
//!
//! - Deterministic export (same dataset, same bytes)
//! - Fail-closed schema versioning
//! - Per-record rejection with a bounded, human-readable error log
//! - Whole-import transaction: nothing is persisted unless the import commits
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trophy::{BackupService, SqliteStore};
//!
//! let store = Arc::new(SqliteStore::new("trophy.db")?);
//! let service = BackupService::new(store);
//!
//! let bytes = service.export_to_bytes().await?;
//! let outcome = service.import_from_bytes(bytes).await?;
//! println!("{}", outcome.summary());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod backup;
pub mod config;
pub mod models;
pub mod observability;
pub mod storage;

pub use backup::{
    BackupService, ByteSink, ByteSource, DocumentError, ExportResult, Exporter, ImportOptions,
    ImportOutcome, Importer, RecordError, RecordErrorKind, WireDocument,
};
pub use config::{BackupSettings, TrophyConfig};
pub use models::{ActivityType, Catch, EntityKind, Equipment, EquipmentType, Location, LocationType};
pub use storage::{EntityStore, EntityWriter, SqliteStore};

/// Error type for trophy operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Io` | A backup file or byte stream cannot be opened, read or written |
/// | `Document` | Import bytes are not a backup document, or its version is unsupported |
/// | `OperationFailed` | Database queries fail, a background worker dies |
/// | `InvalidInput` | Configuration values cannot be parsed |
///
/// Rejections of single records are not errors; they are reported inside
/// [`ImportOutcome`].
#[derive(Debug, ThisError)]
pub enum Error {
    /// A byte sink or source failed.
    ///
    /// Raised when:
    /// - The export file cannot be created or written
    /// - The import file cannot be opened or read
    #[error("i/o failure during '{operation}': {cause}")]
    Io {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The backup document was rejected as a whole.
    ///
    /// Raised before any record is converted, so storage is never touched.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` database operations fail
    /// - A transaction cannot be started, committed or rolled back
    /// - The blocking worker running an export or import panics
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when a configuration file contains values that cannot be
    /// interpreted (for example an unknown log format).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Builds an [`Error::Io`] from an I/O error.
    pub(crate) fn io(operation: &str, err: &std::io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            cause: err.to_string(),
        }
    }

    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub(crate) fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Returns true if the error rejected a whole import document.
    #[must_use]
    pub const fn is_document_error(&self) -> bool {
        matches!(self, Self::Document(_))
    }
}

/// Result type alias for trophy operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "insert_catch".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'insert_catch' failed: disk full");

        let err = Error::Io {
            operation: "write_backup".to_string(),
            cause: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "i/o failure during 'write_backup': permission denied"
        );
    }

    #[test]
    fn test_document_error_is_transparent() {
        let err = Error::from(DocumentError::UnsupportedVersion {
            found: 7,
            supported: vec![1],
        });
        assert!(err.is_document_error());
        assert_eq!(
            err.to_string(),
            "unsupported backup version 7 (supported: 1)"
        );
    }
}
