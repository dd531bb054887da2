//! Store snapshot export.

use crate::Result;
use crate::backup::report::ExportResult;
use crate::backup::wire::{
    WireCatchRecord, WireDocument, WireEquipmentRecord, WireLocationRecord, encode,
};
use crate::storage::EntityStore;
use chrono::NaiveDate;
use tracing::instrument;

/// Builds backup documents from a store.
pub struct Exporter<'a, S: EntityStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: EntityStore + ?Sized> Exporter<'a, S> {
    /// Creates an exporter reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Snapshots the store, stamped with today's local date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`](crate::Error::OperationFailed) if a
    /// store read fails.
    pub fn export(&self) -> Result<WireDocument> {
        self.export_at(chrono::Local::now().date_naive())
    }

    /// Snapshots the store with an explicit export date.
    ///
    /// The three collections are read independently; no referential
    /// consistency between them is assumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`](crate::Error::OperationFailed) if a
    /// store read fails.
    #[instrument(skip(self))]
    pub fn export_at(&self, export_date: NaiveDate) -> Result<WireDocument> {
        let locations = self.store.list_locations()?;
        let equipment = self.store.list_equipment()?;
        let catches = self.store.list_catches()?;

        let mut document = WireDocument::new(export_date);
        document.locations = locations.iter().map(WireLocationRecord::from).collect();
        document.equipment = equipment.iter().map(WireEquipmentRecord::from).collect();
        document.catches = catches.iter().map(WireCatchRecord::from).collect();

        tracing::debug!(
            catches = document.catches.len(),
            locations = document.locations.len(),
            equipment = document.equipment.len(),
            "Built backup document"
        );
        Ok(document)
    }

    /// Snapshots and encodes the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read or encoding fails.
    pub fn export_bytes(&self, pretty: bool) -> Result<(Vec<u8>, ExportResult)> {
        let document = self.export()?;
        let bytes = encode(&document, pretty)?;
        let result = ExportResult {
            catches_exported: document.catches.len(),
            locations_exported: document.locations.len(),
            equipment_exported: document.equipment.len(),
            bytes_written: bytes.len(),
            output_path: None,
        };
        Ok((bytes, result))
    }
}
