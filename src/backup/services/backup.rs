//! Async backup facade.
//!
//! Export and import are synchronous pipelines over a blocking store, so
//! each call runs on one `spawn_blocking` worker. Callers are expected to
//! run one backup operation at a time; nothing here enforces it.

use super::export::Exporter;
use super::import::{ImportOptions, Importer};
use crate::backup::report::{ExportResult, ImportOutcome};
use crate::backup::traits::{ByteSink, ByteSource};
use crate::config::BackupSettings;
use crate::storage::EntityStore;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::instrument;

/// Entry point for backup and restore.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use trophy::{BackupService, SqliteStore};
///
/// # async fn run() -> trophy::Result<()> {
/// let service = BackupService::new(Arc::new(SqliteStore::new("trophy.db")?));
/// let result = service.export_to_file("backup.json").await?;
/// println!("exported {} records", result.total_exported());
/// # Ok(())
/// # }
/// ```
pub struct BackupService<S: EntityStore + ?Sized + 'static> {
    store: Arc<S>,
    settings: BackupSettings,
}

impl<S: EntityStore + ?Sized + 'static> Clone for BackupService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: self.settings.clone(),
        }
    }
}

impl<S: EntityStore + ?Sized + 'static> BackupService<S> {
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            settings: BackupSettings::default(),
        }
    }

    /// Replaces the backup settings.
    #[must_use]
    pub fn with_settings(mut self, settings: BackupSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the backup settings.
    #[must_use]
    pub const fn settings(&self) -> &BackupSettings {
        &self.settings
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Import options derived from the settings.
    #[must_use]
    pub const fn import_options(&self) -> ImportOptions {
        ImportOptions {
            dry_run: false,
            max_reported_errors: self.settings.max_reported_errors,
        }
    }

    /// Exports the store as an encoded document.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails or the worker dies.
    #[instrument(skip(self))]
    pub async fn export_to_bytes(&self) -> Result<Vec<u8>> {
        let pretty = self.settings.pretty;
        let (bytes, _) = self
            .run_blocking("export_backup", move |store| {
                Exporter::new(store).export_bytes(pretty)
            })
            .await?;
        Ok(bytes)
    }

    /// Imports an encoded document using the configured options.
    ///
    /// # Errors
    ///
    /// See [`Importer::import`].
    pub async fn import_from_bytes(&self, bytes: Vec<u8>) -> Result<ImportOutcome> {
        self.import_with_options(bytes, self.import_options()).await
    }

    /// Imports an encoded document with explicit options.
    ///
    /// # Errors
    ///
    /// See [`Importer::import`].
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn import_with_options(
        &self,
        bytes: Vec<u8>,
        options: ImportOptions,
    ) -> Result<ImportOutcome> {
        self.run_blocking("import_backup", move |store| {
            Importer::new(store).import(&bytes, &options)
        })
        .await
    }

    /// Exports the store to a file, replacing it if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> Result<ExportResult> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let pretty = self.settings.pretty;
        self.run_blocking("export_backup_file", move |store| {
            let (bytes, mut result) = Exporter::new(store).export_bytes(pretty)?;
            std::fs::write(&path, &bytes).map_err(|e| Error::io("write_backup_file", &e))?;
            tracing::info!(
                records = result.total_exported(),
                bytes = result.bytes_written,
                "Wrote backup file"
            );
            result.output_path = Some(path);
            Ok(result)
        })
        .await
    }

    /// Imports a backup file using the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise see
    /// [`Importer::import`].
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn import_from_file(&self, path: impl AsRef<Path>) -> Result<ImportOutcome> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let options = self.import_options();
        self.run_blocking("import_backup_file", move |store| {
            let bytes = std::fs::read(&path).map_err(|e| Error::io("read_backup_file", &e))?;
            Importer::new(store).import(&bytes, &options)
        })
        .await
    }

    /// Exports the store into a caller-provided sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub async fn export_to_sink<W: ByteSink + ?Sized>(&self, sink: &mut W) -> Result<ExportResult> {
        let pretty = self.settings.pretty;
        let (bytes, result) = self
            .run_blocking("export_backup", move |store| {
                Exporter::new(store).export_bytes(pretty)
            })
            .await?;
        sink.write_document(&bytes)
            .map_err(|e| Error::io("write_backup_sink", &e))?;
        Ok(result)
    }

    /// Imports a document read from a caller-provided source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source fails, otherwise see
    /// [`Importer::import`].
    pub async fn import_from_source<R: ByteSource + ?Sized>(
        &self,
        source: &mut R,
    ) -> Result<ImportOutcome> {
        let bytes = source
            .read_document()
            .map_err(|e| Error::io("read_backup_source", &e))?;
        self.import_from_bytes(bytes).await
    }

    async fn run_blocking<T, F>(&self, operation: &'static str, task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || task(&*store))
            .await
            .map_err(|e| Error::operation(operation, e))?
    }
}
