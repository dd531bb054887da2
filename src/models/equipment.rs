//! Equipment entity.

use super::{ActivityType, EquipmentType, local_now};
use chrono::NaiveDateTime;

/// A piece of gear.
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    /// Store-assigned identifier (`None` until persisted).
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Kind of gear.
    pub equipment_type: EquipmentType,
    /// Activity the gear is used for.
    pub activity_type: ActivityType,
    /// When the record was created.
    pub created_at: NaiveDateTime,
}

impl Equipment {
    /// Creates an unsaved piece of gear.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        equipment_type: EquipmentType,
        activity_type: ActivityType,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            equipment_type,
            activity_type,
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
