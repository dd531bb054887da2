//! `SQLite`-backed entity store.

use super::rows::{
    CATCH_COLUMNS, CatchRow, EQUIPMENT_COLUMNS, EquipmentRow, LOCATION_COLUMNS, LocationRow,
    format_date, format_datetime, format_time,
};
use super::{acquire_lock, configure_connection, record_operation_metrics, status_label};
use crate::models::{Catch, Equipment, Location};
use crate::storage::traits::{EntityCounts, EntityStore, EntityWriter};
use crate::{Error, Result};
use rusqlite::{Connection, Row, TransactionBehavior, params};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::instrument;

const BACKEND: &str = "sqlite";

/// `SQLite` store for catches, locations and equipment.
///
/// # Concurrency Model
///
/// Uses a `Mutex<Connection>` for thread-safe access. A write batch holds
/// the lock from `BEGIN IMMEDIATE` until `COMMIT` or `ROLLBACK`. WAL mode
/// and the `busy_timeout` pragma cover contention with other processes.
///
/// # Schema
///
/// - `locations`: named coordinates with a location type
/// - `equipment`: named gear with an equipment type and activity
/// - `catches`: trophies, optionally referencing a location
pub struct SqliteStore {
    /// Protected by Mutex because `rusqlite::Connection` is not `Sync`.
    conn: Mutex<Connection>,
    /// Path to the database (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) a store at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trophy::SqliteStore;
    ///
    /// let store = SqliteStore::new("./trophy.db")?;
    /// # Ok::<(), trophy::Error>(())
    /// ```
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).map_err(|e| Error::OperationFailed {
            operation: "open_sqlite".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };

        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_sqlite_in_memory".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };

        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                location_type TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS equipment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                equipment_type TEXT NOT NULL,
                activity_type TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS catches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                activity_type TEXT NOT NULL,
                species TEXT NOT NULL,
                weight REAL,
                length REAL,
                quantity INTEGER NOT NULL DEFAULT 1,
                location_id INTEGER REFERENCES locations(id) ON DELETE SET NULL,
                notes TEXT,
                catch_date TEXT NOT NULL,
                catch_time TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| Error::OperationFailed {
            operation: "create_schema".to_string(),
            cause: e.to_string(),
        })?;

        Self::create_indexes(&conn);
        Ok(())
    }

    fn create_indexes(conn: &Connection) {
        let _ = conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_catches_date ON catches(catch_date DESC)",
            [],
        );
        let _ = conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_catches_location ON catches(location_id)",
            [],
        );
    }

    fn list_rows<R, T>(
        &self,
        operation: &'static str,
        sql: &str,
        read: fn(&Row<'_>) -> rusqlite::Result<R>,
        convert: fn(R) -> Result<T>,
    ) -> Result<Vec<T>> {
        let start = Instant::now();
        let result = self
            .query_rows(operation, sql, read)
            .and_then(|rows| rows.into_iter().map(convert).collect());
        record_operation_metrics(BACKEND, operation, start, status_label(&result));
        result
    }

    fn query_rows<R>(
        &self,
        operation: &str,
        sql: &str,
        read: fn(&Row<'_>) -> rusqlite::Result<R>,
    ) -> Result<Vec<R>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| Error::operation(operation, e))?;
        let rows = stmt
            .query_map([], read)
            .map_err(|e| Error::operation(operation, e))?
            .collect::<rusqlite::Result<Vec<R>>>()
            .map_err(|e| Error::operation(operation, e))?;
        Ok(rows)
    }

    fn run_batch(
        conn: &mut Connection,
        batch: &mut dyn FnMut(&dyn EntityWriter) -> Result<()>,
    ) -> Result<()> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::operation("begin_transaction", e))?;

        let result = batch(&Batch { conn: &tx });
        match result {
            Ok(()) => tx
                .commit()
                .map_err(|e| Error::operation("commit_transaction", e)),
            Err(e) => {
                tracing::warn!(error = %e, "Rolling back write batch");
                if let Err(rollback) = tx.rollback() {
                    tracing::error!(error = %rollback, "Failed to roll back write batch");
                }
                Err(e)
            },
        }
    }
}

/// Writer handed to a batch closure. Borrows the locked connection.
struct Batch<'c> {
    conn: &'c Connection,
}

impl EntityWriter for Batch<'_> {
    fn insert_catch(&self, catch: &Catch) -> Result<i64> {
        insert_catch_row(self.conn, catch)
    }

    fn insert_location(&self, location: &Location) -> Result<i64> {
        insert_location_row(self.conn, location)
    }

    fn insert_equipment(&self, equipment: &Equipment) -> Result<i64> {
        insert_equipment_row(self.conn, equipment)
    }
}

fn insert_catch_row(conn: &Connection, catch: &Catch) -> Result<i64> {
    let start = Instant::now();
    let result = conn
        .execute(
            "INSERT INTO catches (activity_type, species, weight, length, quantity,
                location_id, notes, catch_date, catch_time, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                catch.activity_type.as_str(),
                catch.species,
                catch.weight,
                catch.length,
                catch.quantity,
                catch.location_id,
                catch.notes,
                format_date(catch.catch_date),
                catch.catch_time.map(format_time),
                format_datetime(catch.created_at),
                format_datetime(catch.updated_at),
            ],
        )
        .map(|_| conn.last_insert_rowid())
        .map_err(|e| Error::operation("insert_catch", e));
    record_operation_metrics(BACKEND, "insert_catch", start, status_label(&result));
    result
}

fn insert_location_row(conn: &Connection, location: &Location) -> Result<i64> {
    let start = Instant::now();
    let result = conn
        .execute(
            "INSERT INTO locations (name, description, location_type, latitude, longitude,
                created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                location.name,
                location.description,
                location.location_type.as_str(),
                location.latitude,
                location.longitude,
                format_datetime(location.created_at),
            ],
        )
        .map(|_| conn.last_insert_rowid())
        .map_err(|e| Error::operation("insert_location", e));
    record_operation_metrics(BACKEND, "insert_location", start, status_label(&result));
    result
}

fn insert_equipment_row(conn: &Connection, equipment: &Equipment) -> Result<i64> {
    let start = Instant::now();
    let result = conn
        .execute(
            "INSERT INTO equipment (name, description, equipment_type, activity_type,
                created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                equipment.name,
                equipment.description,
                equipment.equipment_type.as_str(),
                equipment.activity_type.as_str(),
                format_datetime(equipment.created_at),
            ],
        )
        .map(|_| conn.last_insert_rowid())
        .map_err(|e| Error::operation("insert_equipment", e));
    record_operation_metrics(BACKEND, "insert_equipment", start, status_label(&result));
    result
}

impl EntityStore for SqliteStore {
    #[instrument(skip(self))]
    fn list_catches(&self) -> Result<Vec<Catch>> {
        let sql = format!("SELECT {CATCH_COLUMNS} FROM catches ORDER BY id");
        self.list_rows("list_catches", &sql, CatchRow::from_row, CatchRow::into_catch)
    }

    #[instrument(skip(self))]
    fn list_locations(&self) -> Result<Vec<Location>> {
        let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY id");
        self.list_rows(
            "list_locations",
            &sql,
            LocationRow::from_row,
            LocationRow::into_location,
        )
    }

    #[instrument(skip(self))]
    fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let sql = format!("SELECT {EQUIPMENT_COLUMNS} FROM equipment ORDER BY id");
        self.list_rows(
            "list_equipment",
            &sql,
            EquipmentRow::from_row,
            EquipmentRow::into_equipment,
        )
    }

    #[instrument(skip(self, catch), fields(species = %catch.species))]
    fn insert_catch(&self, catch: &Catch) -> Result<i64> {
        insert_catch_row(&acquire_lock(&self.conn), catch)
    }

    #[instrument(skip(self, location), fields(name = %location.name))]
    fn insert_location(&self, location: &Location) -> Result<i64> {
        insert_location_row(&acquire_lock(&self.conn), location)
    }

    #[instrument(skip(self, equipment), fields(name = %equipment.name))]
    fn insert_equipment(&self, equipment: &Equipment) -> Result<i64> {
        insert_equipment_row(&acquire_lock(&self.conn), equipment)
    }

    #[instrument(skip(self, batch))]
    fn write_batch(&self, batch: &mut dyn FnMut(&dyn EntityWriter) -> Result<()>) -> Result<()> {
        let start = Instant::now();
        let result = {
            let mut conn = acquire_lock(&self.conn);
            Self::run_batch(&mut conn, batch)
        };
        record_operation_metrics(BACKEND, "write_batch", start, status_label(&result));
        result
    }

    #[instrument(skip(self))]
    fn counts(&self) -> Result<EntityCounts> {
        let conn = acquire_lock(&self.conn);
        let count = |table: &str| -> Result<usize> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| usize::try_from(n).unwrap_or(0))
            .map_err(|e| Error::operation("count_rows", e))
        };
        Ok(EntityCounts {
            catches: count("catches")?,
            locations: count("locations")?,
            equipment: count("equipment")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, EquipmentType, LocationType};
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_in_memory_starts_empty() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.db_path().is_none());
        assert_eq!(store.counts().unwrap(), EntityCounts::default());
        assert!(store.list_catches().unwrap().is_empty());
    }

    #[test]
    fn test_schema_objects() {
        let store = SqliteStore::in_memory().unwrap();
        let conn = acquire_lock(&store.conn);
        let names = |kind: &str| -> Vec<String> {
            let mut stmt = conn
                .prepare(
                    "SELECT name FROM sqlite_master
                     WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )
                .unwrap();
            let rows = stmt
                .query_map([kind], |row| row.get(0))
                .unwrap()
                .collect::<rusqlite::Result<Vec<String>>>()
                .unwrap();
            rows
        };

        assert_eq!(names("table"), vec!["catches", "equipment", "locations"]);
        assert_eq!(names("index"), vec!["idx_catches_date", "idx_catches_location"]);
    }

    #[test]
    fn test_insert_and_list_catch() {
        let store = SqliteStore::in_memory().unwrap();
        let catch = Catch::new(ActivityType::Fishing, "Pike", date(2024, 6, 1))
            .with_weight(4.25)
            .with_time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())
            .with_notes("weedline");

        let id = store.insert_catch(&catch).unwrap();
        let listed = store.list_catches().unwrap();

        assert_eq!(listed.len(), 1);
        let stored = &listed[0];
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.species, "Pike");
        assert_eq!(stored.weight, Some(4.25));
        assert_eq!(stored.catch_time, catch.catch_time);
        assert_eq!(stored.notes.as_deref(), Some("weedline"));
        assert_eq!(stored.created_at, catch.created_at);
    }

    #[test]
    fn test_insert_location_and_equipment() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .insert_location(
                &Location::new("North Bay", LocationType::Lake, 45.5, -79.25)
                    .with_description("sheltered"),
            )
            .unwrap();
        store
            .insert_equipment(&Equipment::new(
                "Bolt action",
                EquipmentType::Rifle,
                ActivityType::Hunting,
            ))
            .unwrap();

        let locations = store.list_locations().unwrap();
        assert_eq!(locations[0].location_type, LocationType::Lake);
        assert_eq!(locations[0].longitude, -79.25);
        let equipment = store.list_equipment().unwrap();
        assert_eq!(equipment[0].equipment_type, EquipmentType::Rifle);
        assert_eq!(equipment[0].activity_type, ActivityType::Hunting);
        assert_eq!(store.counts().unwrap().total(), 2);
    }

    #[test]
    fn test_failed_batch_discards_inserts() {
        let store = SqliteStore::in_memory().unwrap();
        let deer = Catch::new(ActivityType::Hunting, "Deer", date(2023, 11, 4));

        let err = store
            .write_batch(&mut |writer: &dyn EntityWriter| {
                writer.insert_catch(&deer)?;
                Err(Error::operation("insert_catch", "disk full"))
            })
            .unwrap_err();
        assert!(matches!(err, Error::OperationFailed { .. }));
        assert_eq!(store.counts().unwrap().catches, 0);

        store
            .write_batch(&mut |writer: &dyn EntityWriter| {
                writer.insert_catch(&deer)?;
                writer.insert_location(&Location::new("Ridge", LocationType::Forest, 1.0, 2.0))?;
                Ok(())
            })
            .unwrap();
        assert_eq!(store.counts().unwrap().catches, 1);
        assert_eq!(store.counts().unwrap().locations, 1);
    }

    #[test]
    fn test_concurrent_write_survives_batch_rollback() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut other_writer = None;

        let result = store.write_batch(&mut |writer: &dyn EntityWriter| {
            let shared = Arc::clone(&store);
            other_writer = Some(thread::spawn(move || {
                shared
                    .insert_location(&Location::new("Saved elsewhere", LocationType::Lake, 5.0, 6.0))
                    .unwrap();
            }));
            // Give the other thread time to block on the store.
            thread::sleep(Duration::from_millis(50));
            writer.insert_location(&Location::new("From batch", LocationType::Sea, 7.0, 8.0))?;
            Err(Error::operation("insert_catch", "constraint failed"))
        });
        assert!(result.is_err());
        other_writer.unwrap().join().unwrap();

        let names: Vec<String> = store
            .list_locations()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Saved elsewhere".to_string()]);
    }

    #[test]
    fn test_catch_with_missing_location_is_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let mut catch = Catch::new(ActivityType::Fishing, "Trout", date(2024, 4, 20));
        catch.location_id = Some(999);
        assert!(store.insert_catch(&catch).is_err());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trophy.db");
        {
            let store = SqliteStore::new(&path).unwrap();
            store
                .insert_location(&Location::new("Pond", LocationType::Pond, 1.0, 2.0))
                .unwrap();
        }
        let reopened = SqliteStore::new(&path).unwrap();
        assert_eq!(reopened.db_path(), Some(&path));
        assert_eq!(reopened.list_locations().unwrap()[0].name, "Pond");
    }
}
