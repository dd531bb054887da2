//! Location entity.

use super::{LocationType, local_now};
use chrono::NaiveDateTime;

/// A named fishing water or hunting ground.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Store-assigned identifier (`None` until persisted).
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Kind of place.
    pub location_type: LocationType,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// When the record was created.
    pub created_at: NaiveDateTime,
}

impl Location {
    /// Creates an unsaved location.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location_type: LocationType,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            location_type,
            latitude,
            longitude,
            created_at: local_now(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
