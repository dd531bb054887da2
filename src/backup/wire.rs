//! Versioned JSON backup document.
//!
//! The wire form is a flat projection of the store: no identifiers, no
//! foreign keys, no timestamps other than the export date. Field order in
//! the structs below is the order written to disk.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportDate": "2024-06-01",
//!   "catches": [{ "species": "Pike", "activityType": "FISHING", ... }],
//!   "locations": [{ "name": "North Arm", "latitude": 45.5, ... }],
//!   "equipment": [{ "name": "Spinning rod", "equipmentType": "ROD", ... }]
//! }
//! ```

use crate::models::{Catch, DATE_FORMAT, Equipment, Location};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

/// Version stamped on every export.
pub const CURRENT_VERSION: i64 = 1;

/// Versions this build can import.
pub const SUPPORTED_VERSIONS: &[i64] = &[1];

const WIRE_TIME_SHORT: &str = "%H:%M";
const WIRE_TIME_FULL: &str = "%H:%M:%S%.f";

/// A whole-document rejection.
///
/// Returned before any record is looked at, so an import that fails with a
/// `DocumentError` never touches storage.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DocumentError {
    /// The bytes are not a backup document.
    ///
    /// Raised when:
    /// - The input is not valid JSON (including empty input)
    /// - `version` is missing or not an integer
    /// - A collection or record does not have the expected shape
    #[error("malformed backup document: {0}")]
    Malformed(String),

    /// The document declares a version this build cannot read.
    #[error("unsupported backup version {found} (supported: {})", join_versions(.supported))]
    UnsupportedVersion {
        /// Version found in the document.
        found: i64,
        /// Versions this build accepts.
        supported: Vec<i64>,
    },
}

fn join_versions(versions: &[i64]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// Schema version.
    pub version: i64,
    /// Export date as `YYYY-MM-DD`. Informational only.
    pub export_date: String,
    /// Catches in store order.
    pub catches: Vec<WireCatchRecord>,
    /// Locations in store order.
    pub locations: Vec<WireLocationRecord>,
    /// Equipment in store order.
    pub equipment: Vec<WireEquipmentRecord>,
}

impl WireDocument {
    /// Creates an empty document at [`CURRENT_VERSION`].
    #[must_use]
    pub fn new(export_date: NaiveDate) -> Self {
        Self {
            version: CURRENT_VERSION,
            export_date: format_date(export_date),
            catches: Vec::new(),
            locations: Vec::new(),
            equipment: Vec::new(),
        }
    }

    /// Returns the number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.catches.len() + self.locations.len() + self.equipment.len()
    }
}

/// Wire form of a catch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCatchRecord {
    /// Species name.
    pub species: String,
    /// Canonical activity name.
    pub activity_type: String,
    /// Weight, if recorded.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Length, if recorded.
    #[serde(default)]
    pub length: Option<f64>,
    /// Number of animals.
    pub quantity: i32,
    /// Catch date as `YYYY-MM-DD`.
    pub catch_date: String,
    /// Time of day, `HH:MM` or `HH:MM:SS[.fff]`.
    #[serde(default)]
    pub catch_time: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Wire form of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLocationRecord {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Canonical location type name.
    pub location_type: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Wire form of a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEquipmentRecord {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical equipment type name.
    pub equipment_type: String,
    /// Canonical activity name.
    pub activity_type: String,
}

impl From<&Catch> for WireCatchRecord {
    fn from(catch: &Catch) -> Self {
        Self {
            species: catch.species.clone(),
            activity_type: catch.activity_type.as_str().to_string(),
            weight: catch.weight,
            length: catch.length,
            quantity: catch.quantity,
            catch_date: format_date(catch.catch_date),
            catch_time: catch.catch_time.map(format_time),
            notes: catch.notes.clone(),
        }
    }
}

impl From<&Location> for WireLocationRecord {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            location_type: location.location_type.as_str().to_string(),
            description: location.description.clone(),
        }
    }
}

impl From<&Equipment> for WireEquipmentRecord {
    fn from(equipment: &Equipment) -> Self {
        Self {
            name: equipment.name.clone(),
            description: equipment.description.clone(),
            equipment_type: equipment.equipment_type.as_str().to_string(),
            activity_type: equipment.activity_type.as_str().to_string(),
        }
    }
}

/// Serializes a document.
///
/// Pretty output uses a two-space indent. The same document always encodes
/// to the same bytes.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if a coordinate, weight or length is
/// NaN or infinite (JSON has no representation for them, and writing `null`
/// would produce a backup that cannot be restored), or if serialization
/// fails.
pub fn encode(document: &WireDocument, pretty: bool) -> Result<Vec<u8>> {
    ensure_finite(document)?;
    let encoded = if pretty {
        serde_json::to_vec_pretty(document)
    } else {
        serde_json::to_vec(document)
    };
    encoded.map_err(|e| Error::operation("encode_backup", e))
}

fn ensure_finite(document: &WireDocument) -> Result<()> {
    let check = |entity: &str, name: &str, field: &str, value: f64| {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Error::operation(
                "encode_backup",
                format!("{entity} '{name}': non-finite {field} {value}"),
            ))
        }
    };

    for location in &document.locations {
        check("location", &location.name, "latitude", location.latitude)?;
        check("location", &location.name, "longitude", location.longitude)?;
    }
    for catch in &document.catches {
        if let Some(weight) = catch.weight {
            check("catch", &catch.species, "weight", weight)?;
        }
        if let Some(length) = catch.length {
            check("catch", &catch.species, "length", length)?;
        }
    }
    Ok(())
}

/// Parses and version-checks a document.
///
/// The bytes are parsed once. `version` is checked before any record is
/// bound, so a document from a newer build is rejected as unsupported even
/// if its records have a different shape.
///
/// # Errors
///
/// Returns [`DocumentError::Malformed`] for anything that is not a well
/// formed document and [`DocumentError::UnsupportedVersion`] for a version
/// outside [`SUPPORTED_VERSIONS`].
pub fn decode(bytes: &[u8]) -> std::result::Result<WireDocument, DocumentError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DocumentError::Malformed(e.to_string()))?;

    let version = value
        .get("version")
        .and_then(Value::as_i64)
        .ok_or_else(|| DocumentError::Malformed("missing or non-integer version".to_string()))?;

    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(DocumentError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_VERSIONS.to_vec(),
        });
    }

    serde_json::from_value(value).map_err(|e| DocumentError::Malformed(e.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a time the way `HH:MM[:SS[.fff]]` readers expect.
///
/// Seconds are omitted when both seconds and fraction are zero. The
/// fraction is printed in groups of three digits.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 && time.nanosecond() == 0 {
        time.format(WIRE_TIME_SHORT).to_string()
    } else {
        time.format(WIRE_TIME_FULL).to_string()
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// Every field must be zero padded and the year has no sign.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parses an `HH:MM` or `HH:MM:SS[.f]` time, with one to nine fraction
/// digits.
///
/// Every field must be zero padded. Leap seconds are rejected.
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let bytes = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|part| part.iter().all(u8::is_ascii_digit))
    };
    let at = |index: usize, expected: u8| bytes.get(index) == Some(&expected);

    let hours_minutes = digits(0..2) && at(2, b':') && digits(3..5);
    let with_seconds = hours_minutes && at(5, b':') && digits(6..8);
    let parsed = match bytes.len() {
        5 if hours_minutes => NaiveTime::parse_from_str(value, WIRE_TIME_SHORT),
        8 if with_seconds => NaiveTime::parse_from_str(value, WIRE_TIME_FULL),
        10..=18 if with_seconds && at(8, b'.') && digits(9..bytes.len()) => {
            NaiveTime::parse_from_str(value, WIRE_TIME_FULL)
        },
        _ => return None,
    };
    parsed.ok().filter(|time| time.nanosecond() < 1_000_000_000)
}
