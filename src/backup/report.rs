//! Import and export result reporting.

use super::convert::RecordError;
use crate::models::EntityKind;
use std::path::PathBuf;

/// Default number of rejection messages kept in an [`ImportOutcome`].
pub const DEFAULT_MAX_REPORTED_ERRORS: usize = 10;

/// Running counters for an import in progress.
///
/// Only the first `max_errors` rejection messages are kept. Later
/// rejections are counted but their messages are dropped.
#[derive(Debug, Clone)]
pub struct ImportTally {
    catches_imported: usize,
    locations_imported: usize,
    equipment_imported: usize,
    catches_failed: usize,
    locations_failed: usize,
    equipment_failed: usize,
    errors: Vec<String>,
    max_errors: usize,
}

impl Default for ImportTally {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPORTED_ERRORS)
    }
}

impl ImportTally {
    /// Creates an empty tally keeping at most `max_errors` messages.
    #[must_use]
    pub const fn new(max_errors: usize) -> Self {
        Self {
            catches_imported: 0,
            locations_imported: 0,
            equipment_imported: 0,
            catches_failed: 0,
            locations_failed: 0,
            equipment_failed: 0,
            errors: Vec::new(),
            max_errors,
        }
    }

    /// Counts one accepted record.
    pub const fn record_success(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Catch => self.catches_imported += 1,
            EntityKind::Location => self.locations_imported += 1,
            EntityKind::Equipment => self.equipment_imported += 1,
        }
    }

    /// Counts one rejected record, keeping its message while under the cap.
    pub fn record_failure(&mut self, error: &RecordError) {
        match error.entity {
            EntityKind::Catch => self.catches_failed += 1,
            EntityKind::Location => self.locations_failed += 1,
            EntityKind::Equipment => self.equipment_failed += 1,
        }
        if self.errors.len() < self.max_errors {
            self.errors.push(error.to_string());
        }
    }

    /// Returns the number of rejections so far.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.catches_failed + self.locations_failed + self.equipment_failed
    }

    /// Produces the outcome.
    #[must_use]
    pub fn finish(self) -> ImportOutcome {
        ImportOutcome {
            catches_imported: self.catches_imported,
            locations_imported: self.locations_imported,
            equipment_imported: self.equipment_imported,
            catches_failed: self.catches_failed,
            locations_failed: self.locations_failed,
            equipment_failed: self.equipment_failed,
            errors: self.errors,
        }
    }
}

/// Result of a completed import.
///
/// Counters cover every record; `errors` holds only the first few
/// rejection messages in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Catches inserted.
    pub catches_imported: usize,
    /// Locations inserted.
    pub locations_imported: usize,
    /// Equipment inserted.
    pub equipment_imported: usize,
    /// Catches rejected.
    pub catches_failed: usize,
    /// Locations rejected.
    pub locations_failed: usize,
    /// Equipment rejected.
    pub equipment_failed: usize,
    /// Rejection messages, truncated.
    pub errors: Vec<String>,
}

impl ImportOutcome {
    /// Returns the number of inserted records.
    #[must_use]
    pub const fn total_imported(&self) -> usize {
        self.catches_imported + self.locations_imported + self.equipment_imported
    }

    /// Returns the number of rejected records.
    #[must_use]
    pub const fn total_failed(&self) -> usize {
        self.catches_failed + self.locations_failed + self.equipment_failed
    }

    /// Returns whether any record was rejected.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.total_failed() > 0
    }

    /// One-line summary, e.g. `Imported 12 of 15 records; 3 failed`.
    #[must_use]
    pub fn summary(&self) -> String {
        let imported = self.total_imported();
        let failed = self.total_failed();
        let total = imported + failed;
        if failed == 0 {
            format!("Imported {imported} of {total} records")
        } else {
            format!("Imported {imported} of {total} records; {failed} failed")
        }
    }
}

/// Result of a completed export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResult {
    /// Catches written.
    pub catches_exported: usize,
    /// Locations written.
    pub locations_exported: usize,
    /// Equipment written.
    pub equipment_exported: usize,
    /// Size of the encoded document.
    pub bytes_written: usize,
    /// Destination file, when exporting to a path.
    pub output_path: Option<PathBuf>,
}

impl ExportResult {
    /// Returns the number of exported records.
    #[must_use]
    pub const fn total_exported(&self) -> usize {
        self.catches_exported + self.locations_exported + self.equipment_exported
    }
}
