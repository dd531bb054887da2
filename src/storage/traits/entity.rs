//! Entity store trait.

use crate::Result;
use crate::models::{Catch, Equipment, Location};

/// Row counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    /// Number of catches.
    pub catches: usize,
    /// Number of locations.
    pub locations: usize,
    /// Number of equipment items.
    pub equipment: usize,
}

impl EntityCounts {
    /// Returns the total number of rows.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.catches + self.locations + self.equipment
    }
}

/// Insert operations available inside a [`EntityStore::write_batch`].
pub trait EntityWriter {
    /// Inserts a catch.
    fn insert_catch(&self, catch: &Catch) -> Result<i64>;

    /// Inserts a location.
    fn insert_location(&self, location: &Location) -> Result<i64>;

    /// Inserts a piece of equipment.
    fn insert_equipment(&self, equipment: &Equipment) -> Result<i64>;
}

/// Trait for the store that owns catches, locations and equipment.
///
/// The backup pipeline only reads everything and inserts new rows; it never
/// updates or deletes. Inserts ignore the entity's `id` and return the
/// identifier the store assigned.
///
/// # Transactions
///
/// [`write_batch`](Self::write_batch) runs a closure inside one write
/// transaction. Either every insert made through the closure's
/// [`EntityWriter`] becomes visible or none does. While the batch runs,
/// other callers of the same store wait, so their writes can never land in
/// the batch's transaction.
pub trait EntityStore: Send + Sync {
    /// Lists all catches in insertion order.
    fn list_catches(&self) -> Result<Vec<Catch>>;

    /// Lists all locations in insertion order.
    fn list_locations(&self) -> Result<Vec<Location>>;

    /// Lists all equipment in insertion order.
    fn list_equipment(&self) -> Result<Vec<Equipment>>;

    /// Inserts a catch.
    fn insert_catch(&self, catch: &Catch) -> Result<i64>;

    /// Inserts a location.
    fn insert_location(&self, location: &Location) -> Result<i64>;

    /// Inserts a piece of equipment.
    fn insert_equipment(&self, equipment: &Equipment) -> Result<i64>;

    /// Runs `batch` inside one write transaction.
    ///
    /// Commits when `batch` returns `Ok`. Rolls back and returns the error
    /// when `batch` or the commit fails.
    fn write_batch(&self, batch: &mut dyn FnMut(&dyn EntityWriter) -> Result<()>) -> Result<()>;

    /// Returns the number of stored rows per kind.
    fn counts(&self) -> Result<EntityCounts> {
        Ok(EntityCounts {
            catches: self.list_catches()?.len(),
            locations: self.list_locations()?.len(),
            equipment: self.list_equipment()?.len(),
        })
    }
}
