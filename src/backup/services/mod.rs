//! Backup pipeline services.

pub mod backup;
pub mod export;
pub mod import;

pub use backup::BackupService;
pub use export::Exporter;
pub use import::{ImportOptions, Importer};
