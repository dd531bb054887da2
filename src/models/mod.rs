//! Domain models for the trophy log.
//!
//! Entities carry an optional store identifier and creation timestamps; the
//! backup format carries neither.

mod catch;
mod equipment;
mod kinds;
mod location;

pub use catch::Catch;
pub use equipment::Equipment;
pub use kinds::{ActivityType, EntityKind, EquipmentType, LocationType};
pub use location::Location;

use chrono::NaiveDateTime;

/// ISO-8601 calendar date, shared by the store and the backup format.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the current local wall-clock time.
///
/// Entity timestamps are local, matching how the log is displayed.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_catch_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let catch = Catch::new(ActivityType::Fishing, "Pike", date)
            .with_weight(4.2)
            .with_length(81.0)
            .with_quantity(2)
            .with_time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())
            .with_notes("spoon lure");

        assert_eq!(catch.id, None);
        assert_eq!(catch.species, "Pike");
        assert_eq!(catch.weight, Some(4.2));
        assert_eq!(catch.length, Some(81.0));
        assert_eq!(catch.quantity, 2);
        assert_eq!(catch.notes.as_deref(), Some("spoon lure"));
        assert_eq!(catch.created_at, catch.updated_at);
    }

    #[test]
    fn test_catch_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let catch = Catch::new(ActivityType::Hunting, "Hare", date);
        assert_eq!(catch.quantity, 1);
        assert!(catch.weight.is_none());
        assert!(catch.catch_time.is_none());
        assert!(catch.location_id.is_none());
    }

    #[test]
    fn test_location_and_equipment_builders() {
        let lake = Location::new("Black Lake", LocationType::Lake, 55.75, 37.61)
            .with_description("north shore");
        assert_eq!(lake.description.as_deref(), Some("north shore"));
        assert_eq!(lake.location_type, LocationType::Lake);

        let rifle = Equipment::new("Old rifle", EquipmentType::Rifle, ActivityType::Hunting);
        assert!(rifle.description.is_none());
        assert_eq!(rifle.activity_type, ActivityType::Hunting);
    }
}
