//! Wire record to domain entity conversion.
//!
//! Each converter is total: it either produces an entity ready for
//! insertion or a [`RecordError`] naming the first field that could not be
//! interpreted. Fields are checked in the order they appear on the wire.
//! Values are not range-checked; a negative weight is carried as is.

use super::wire::{
    WireCatchRecord, WireEquipmentRecord, WireLocationRecord, parse_date, parse_time,
};
use crate::models::{
    ActivityType, Catch, EntityKind, Equipment, EquipmentType, Location, LocationType,
};
use thiserror::Error as ThisError;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    /// An enumeration name that matches no variant.
    UnknownEnumVariant,
    /// A date or time that does not parse.
    MalformedValue,
}

impl RecordErrorKind {
    /// Returns the word used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownEnumVariant => "unknown",
            Self::MalformedValue => "malformed",
        }
    }
}

/// A rejected wire record.
///
/// Displays as `catch 'Pike': unknown activityType 'SWIMMING'`.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{} '{identifier}': {} {field} '{value}'", .entity.as_str(), .kind.as_str())]
pub struct RecordError {
    /// Why the field was rejected.
    pub kind: RecordErrorKind,
    /// Kind of record.
    pub entity: EntityKind,
    /// Species for catches, name otherwise.
    pub identifier: String,
    /// Wire name of the offending field.
    pub field: &'static str,
    /// The offending value.
    pub value: String,
}

impl RecordError {
    fn new(
        kind: RecordErrorKind,
        entity: EntityKind,
        identifier: &str,
        field: &'static str,
        value: &str,
    ) -> Self {
        Self {
            kind,
            entity,
            identifier: identifier.to_string(),
            field,
            value: value.to_string(),
        }
    }
}

/// Field-level parsing bound to one record, for error context.
struct FieldReader<'a> {
    entity: EntityKind,
    identifier: &'a str,
}

impl FieldReader<'_> {
    fn enumeration<T>(
        &self,
        field: &'static str,
        value: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, RecordError> {
        parse(value).ok_or_else(|| {
            RecordError::new(
                RecordErrorKind::UnknownEnumVariant,
                self.entity,
                self.identifier,
                field,
                value,
            )
        })
    }

    fn value<T>(
        &self,
        field: &'static str,
        value: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, RecordError> {
        parse(value).ok_or_else(|| {
            RecordError::new(
                RecordErrorKind::MalformedValue,
                self.entity,
                self.identifier,
                field,
                value,
            )
        })
    }
}

/// Converts a wire catch into a new [`Catch`].
///
/// # Errors
///
/// Returns a [`RecordError`] for an unknown `activityType` or a malformed
/// `catchDate` or `catchTime`.
pub fn to_catch(record: &WireCatchRecord) -> Result<Catch, RecordError> {
    let reader = FieldReader {
        entity: EntityKind::Catch,
        identifier: &record.species,
    };

    let activity_type =
        reader.enumeration("activityType", &record.activity_type, ActivityType::parse)?;
    let catch_date = reader.value("catchDate", &record.catch_date, parse_date)?;
    let catch_time = record
        .catch_time
        .as_deref()
        .map(|time| reader.value("catchTime", time, parse_time))
        .transpose()?;

    let mut catch = Catch::new(activity_type, record.species.clone(), catch_date)
        .with_quantity(record.quantity);
    catch.weight = record.weight;
    catch.length = record.length;
    catch.catch_time = catch_time;
    catch.notes.clone_from(&record.notes);
    Ok(catch)
}

/// Converts a wire location into a new [`Location`].
///
/// # Errors
///
/// Returns a [`RecordError`] for an unknown `locationType`.
pub fn to_location(record: &WireLocationRecord) -> Result<Location, RecordError> {
    let reader = FieldReader {
        entity: EntityKind::Location,
        identifier: &record.name,
    };

    let location_type =
        reader.enumeration("locationType", &record.location_type, LocationType::parse)?;

    let mut location = Location::new(
        record.name.clone(),
        location_type,
        record.latitude,
        record.longitude,
    );
    location.description.clone_from(&record.description);
    Ok(location)
}

/// Converts a wire equipment record into a new [`Equipment`].
///
/// # Errors
///
/// Returns a [`RecordError`] for an unknown `equipmentType` or
/// `activityType`.
pub fn to_equipment(record: &WireEquipmentRecord) -> Result<Equipment, RecordError> {
    let reader = FieldReader {
        entity: EntityKind::Equipment,
        identifier: &record.name,
    };

    let equipment_type =
        reader.enumeration("equipmentType", &record.equipment_type, EquipmentType::parse)?;
    let activity_type =
        reader.enumeration("activityType", &record.activity_type, ActivityType::parse)?;

    let mut equipment = Equipment::new(record.name.clone(), equipment_type, activity_type);
    equipment.description.clone_from(&record.description);
    Ok(equipment)
}
