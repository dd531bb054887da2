//! Backup and restore.
//!
//! # Architecture
//!
//! - [`wire`]: the versioned JSON document and its encoder/decoder
//! - [`convert`]: wire record to entity conversion with per-record errors
//! - [`report`]: import tallies and export results
//! - [`traits`]: byte sinks and sources
//! - [`services`]: exporter, transactional importer and the async facade
//!
//! # Example
//!
//! ```rust,ignore
//! use trophy::backup::{ImportOptions, Importer};
//!
//! let outcome = Importer::new(&store).import(&bytes, &ImportOptions::default())?;
//! for message in &outcome.errors {
//!     eprintln!("{message}");
//! }
//! ```

pub mod convert;
pub mod report;
pub mod services;
pub mod traits;
pub mod wire;

pub use convert::{RecordError, RecordErrorKind, to_catch, to_equipment, to_location};
pub use report::{DEFAULT_MAX_REPORTED_ERRORS, ExportResult, ImportOutcome, ImportTally};
pub use services::{BackupService, Exporter, ImportOptions, Importer};
pub use traits::{ByteSink, ByteSource};
pub use wire::{
    CURRENT_VERSION, DocumentError, SUPPORTED_VERSIONS, WireCatchRecord, WireDocument,
    WireEquipmentRecord, WireLocationRecord, decode, encode,
};
