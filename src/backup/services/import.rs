//! Backup document import.
//!
//! Records are converted one at a time and inserted in dependency order:
//! locations, then equipment, then catches. A record that cannot be
//! converted is skipped and reported; it never stops the import. A storage
//! failure does stop it, and because the whole import runs inside one
//! transaction nothing from that import is kept.

use crate::backup::convert::{RecordError, to_catch, to_equipment, to_location};
use crate::backup::report::{DEFAULT_MAX_REPORTED_ERRORS, ImportOutcome, ImportTally};
use crate::backup::wire::{WireDocument, decode};
use crate::models::EntityKind;
use crate::storage::{EntityStore, EntityWriter};
use crate::{Error, Result};
use tracing::instrument;

/// Options for a backup import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Validate and count without writing.
    pub dry_run: bool,
    /// Maximum number of rejection messages kept in the outcome.
    pub max_reported_errors: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_reported_errors: DEFAULT_MAX_REPORTED_ERRORS,
        }
    }
}

impl ImportOptions {
    /// Enables or disables dry run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the number of rejection messages kept.
    #[must_use]
    pub const fn with_max_reported_errors(mut self, max: usize) -> Self {
        self.max_reported_errors = max;
        self
    }
}

/// Restores backup documents into a store.
pub struct Importer<'a, S: EntityStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: EntityStore + ?Sized> Importer<'a, S> {
    /// Creates an importer writing to `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Decodes and imports a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`] if the bytes are rejected as a whole (the
    /// store is not touched), or [`Error::OperationFailed`] if the store
    /// fails (the import is rolled back).
    #[instrument(skip(self, bytes), fields(bytes = bytes.len(), dry_run = options.dry_run))]
    pub fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportOutcome> {
        let document = decode(bytes).map_err(|e| {
            tracing::warn!(error = %e, "Rejected backup document");
            Error::from(e)
        })?;
        self.import_document(&document, options)
    }

    /// Imports an already decoded document.
    ///
    /// The version is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the store fails; the import is
    /// rolled back.
    pub fn import_document(
        &self,
        document: &WireDocument,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let mut tally = ImportTally::new(options.max_reported_errors);

        if options.dry_run {
            Self::apply(document, &mut tally, None)?;
        } else {
            self.store
                .write_batch(&mut |writer: &dyn EntityWriter| {
                    Self::apply(document, &mut tally, Some(writer))
                })
                .inspect_err(|e| tracing::warn!(error = %e, "Backup import rolled back"))?;
        }

        let outcome = tally.finish();
        tracing::info!(
            imported = outcome.total_imported(),
            failed = outcome.total_failed(),
            dry_run = options.dry_run,
            "{}",
            outcome.summary()
        );
        Ok(outcome)
    }

    /// Converts every record and, when `writer` is set, inserts the accepted
    /// ones. Without a writer nothing is written.
    fn apply(
        document: &WireDocument,
        tally: &mut ImportTally,
        writer: Option<&dyn EntityWriter>,
    ) -> Result<()> {
        for record in &document.locations {
            Self::apply_one(tally, EntityKind::Location, to_location(record), |location| {
                if let Some(writer) = writer {
                    writer.insert_location(&location)?;
                }
                Ok(())
            })?;
        }

        for record in &document.equipment {
            Self::apply_one(tally, EntityKind::Equipment, to_equipment(record), |equipment| {
                if let Some(writer) = writer {
                    writer.insert_equipment(&equipment)?;
                }
                Ok(())
            })?;
        }

        for record in &document.catches {
            Self::apply_one(tally, EntityKind::Catch, to_catch(record), |catch| {
                if let Some(writer) = writer {
                    writer.insert_catch(&catch)?;
                }
                Ok(())
            })?;
        }

        Ok(())
    }

    fn apply_one<T>(
        tally: &mut ImportTally,
        kind: EntityKind,
        converted: std::result::Result<T, RecordError>,
        insert: impl FnOnce(T) -> Result<()>,
    ) -> Result<()> {
        match converted {
            Ok(entity) => {
                insert(entity)?;
                tally.record_success(kind);
            },
            Err(rejection) => {
                tracing::warn!(kind = kind.as_str(), error = %rejection, "Skipped backup record");
                tally.record_failure(&rejection);
            },
        }
        Ok(())
    }
}
