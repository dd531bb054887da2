//! Catch entity.

use super::{ActivityType, local_now};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A logged catch or trophy.
///
/// `weight` is in kilograms and `length` in centimetres. Neither is range
/// checked here; validation belongs to the editing screens.
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    /// Store-assigned identifier (`None` until persisted).
    pub id: Option<i64>,
    /// Fishing or hunting.
    pub activity_type: ActivityType,
    /// Species name, also the record's display identifier.
    pub species: String,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Length in centimetres.
    pub length: Option<f64>,
    /// Number of individuals caught.
    pub quantity: i32,
    /// Place of the catch. Not carried by backups.
    pub location_id: Option<i64>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Day of the catch.
    pub catch_date: NaiveDate,
    /// Time of day, when recorded.
    pub catch_time: Option<NaiveTime>,
    /// When the record was created.
    pub created_at: NaiveDateTime,
    /// When the record was last changed.
    pub updated_at: NaiveDateTime,
}

impl Catch {
    /// Creates an unsaved catch with a quantity of one.
    #[must_use]
    pub fn new(activity_type: ActivityType, species: impl Into<String>, catch_date: NaiveDate) -> Self {
        let now = local_now();
        Self {
            id: None,
            activity_type,
            species: species.into(),
            weight: None,
            length: None,
            quantity: 1,
            location_id: None,
            notes: None,
            catch_date,
            catch_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the length.
    #[must_use]
    pub const fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the time of day.
    #[must_use]
    pub const fn with_time(mut self, time: NaiveTime) -> Self {
        self.catch_time = Some(time);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
