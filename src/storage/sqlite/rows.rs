//! Row conversion for the `SQLite` store.
//!
//! Rows are read into plain structs of primitive columns first, then
//! converted into domain entities. Enumerations are stored by canonical
//! name, dates and times as ISO-8601 text.

use crate::models::{
    ActivityType, Catch, DATE_FORMAT, Equipment, EquipmentType, Location, LocationType,
};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Row;

const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Column list matching [`CatchRow::from_row`].
pub const CATCH_COLUMNS: &str = "id, activity_type, species, weight, length, quantity, location_id, \
     notes, catch_date, catch_time, created_at, updated_at";
/// Column list matching [`LocationRow::from_row`].
pub const LOCATION_COLUMNS: &str =
    "id, name, description, location_type, latitude, longitude, created_at";
/// Column list matching [`EquipmentRow::from_row`].
pub const EQUIPMENT_COLUMNS: &str =
    "id, name, description, equipment_type, activity_type, created_at";

/// Raw `catches` row.
#[derive(Debug)]
pub struct CatchRow {
    /// Row id.
    pub id: i64,
    /// Activity name.
    pub activity_type: String,
    /// Species.
    pub species: String,
    /// Weight.
    pub weight: Option<f64>,
    /// Length.
    pub length: Option<f64>,
    /// Quantity.
    pub quantity: i32,
    /// Location reference.
    pub location_id: Option<i64>,
    /// Notes.
    pub notes: Option<String>,
    /// Date text.
    pub catch_date: String,
    /// Time text.
    pub catch_time: Option<String>,
    /// Creation timestamp text.
    pub created_at: String,
    /// Update timestamp text.
    pub updated_at: String,
}

impl CatchRow {
    /// Reads a row selected with [`CATCH_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            activity_type: row.get(1)?,
            species: row.get(2)?,
            weight: row.get(3)?,
            length: row.get(4)?,
            quantity: row.get(5)?,
            location_id: row.get(6)?,
            notes: row.get(7)?,
            catch_date: row.get(8)?,
            catch_time: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    /// Converts the row into a [`Catch`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if a stored value is corrupt.
    pub fn into_catch(self) -> Result<Catch> {
        Ok(Catch {
            id: Some(self.id),
            activity_type: parse_stored(
                "catches.activity_type",
                &self.activity_type,
                ActivityType::parse,
            )?,
            species: self.species,
            weight: self.weight,
            length: self.length,
            quantity: self.quantity,
            location_id: self.location_id,
            notes: self.notes,
            catch_date: parse_date("catches.catch_date", &self.catch_date)?,
            catch_time: self
                .catch_time
                .as_deref()
                .map(|t| parse_time("catches.catch_time", t))
                .transpose()?,
            created_at: parse_datetime("catches.created_at", &self.created_at)?,
            updated_at: parse_datetime("catches.updated_at", &self.updated_at)?,
        })
    }
}

/// Raw `locations` row.
#[derive(Debug)]
pub struct LocationRow {
    /// Row id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Location type name.
    pub location_type: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Creation timestamp text.
    pub created_at: String,
}

impl LocationRow {
    /// Reads a row selected with [`LOCATION_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            location_type: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    /// Converts the row into a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if a stored value is corrupt.
    pub fn into_location(self) -> Result<Location> {
        Ok(Location {
            id: Some(self.id),
            name: self.name,
            description: self.description,
            location_type: parse_stored(
                "locations.location_type",
                &self.location_type,
                LocationType::parse,
            )?,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: parse_datetime("locations.created_at", &self.created_at)?,
        })
    }
}

/// Raw `equipment` row.
#[derive(Debug)]
pub struct EquipmentRow {
    /// Row id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Equipment type name.
    pub equipment_type: String,
    /// Activity name.
    pub activity_type: String,
    /// Creation timestamp text.
    pub created_at: String,
}

impl EquipmentRow {
    /// Reads a row selected with [`EQUIPMENT_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            equipment_type: row.get(3)?,
            activity_type: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    /// Converts the row into an [`Equipment`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if a stored value is corrupt.
    pub fn into_equipment(self) -> Result<Equipment> {
        Ok(Equipment {
            id: Some(self.id),
            name: self.name,
            description: self.description,
            equipment_type: parse_stored(
                "equipment.equipment_type",
                &self.equipment_type,
                EquipmentType::parse,
            )?,
            activity_type: parse_stored(
                "equipment.activity_type",
                &self.activity_type,
                ActivityType::parse,
            )?,
            created_at: parse_datetime("equipment.created_at", &self.created_at)?,
        })
    }
}

/// Formats a date for storage.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a time for storage.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Formats a timestamp for storage.
#[must_use]
pub fn format_datetime(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

fn corrupt(column: &str, value: &str) -> Error {
    Error::OperationFailed {
        operation: "decode_row".to_string(),
        cause: format!("corrupt value '{value}' in column {column}"),
    }
}

fn parse_stored<T>(column: &str, value: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
    parse(value).ok_or_else(|| corrupt(column, value))
}

fn parse_date(column: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| corrupt(column, value))
}

fn parse_time(column: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| corrupt(column, value))
}

fn parse_datetime(column: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| corrupt(column, value))
}
