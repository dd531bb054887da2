//! Closed enumerations shared by the domain entities.
//!
//! Every enumeration is stored and exchanged by its canonical uppercase name.
//! Parsing is exact: `"fishing"` is not `FISHING`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of outdoor activity a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Angling of any kind.
    Fishing,
    /// Game hunting.
    Hunting,
}

impl ActivityType {
    /// Returns all activity variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fishing, Self::Hunting]
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fishing => "FISHING",
            Self::Hunting => "HUNTING",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FISHING" => Some(Self::Fishing),
            "HUNTING" => Some(Self::Hunting),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of place where catches happen.
///
/// The first group covers waters, the second hunting grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// River.
    River,
    /// Lake.
    Lake,
    /// Pond.
    Pond,
    /// Reservoir.
    Reservoir,
    /// Sea.
    Sea,
    /// Flooded quarry.
    Quarry,
    /// Forest.
    Forest,
    /// Field.
    Field,
    /// Swamp.
    Swamp,
    /// Meadow.
    Meadow,
    /// Mountains.
    Mountains,
    /// Managed hunting grounds.
    Grounds,
    /// Anything else.
    Other,
}

impl LocationType {
    /// Returns all location variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::River,
            Self::Lake,
            Self::Pond,
            Self::Reservoir,
            Self::Sea,
            Self::Quarry,
            Self::Forest,
            Self::Field,
            Self::Swamp,
            Self::Meadow,
            Self::Mountains,
            Self::Grounds,
            Self::Other,
        ]
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::River => "RIVER",
            Self::Lake => "LAKE",
            Self::Pond => "POND",
            Self::Reservoir => "RESERVOIR",
            Self::Sea => "SEA",
            Self::Quarry => "QUARRY",
            Self::Forest => "FOREST",
            Self::Field => "FIELD",
            Self::Swamp => "SWAMP",
            Self::Meadow => "MEADOW",
            Self::Mountains => "MOUNTAINS",
            Self::Grounds => "GROUNDS",
            Self::Other => "OTHER",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RIVER" => Some(Self::River),
            "LAKE" => Some(Self::Lake),
            "POND" => Some(Self::Pond),
            "RESERVOIR" => Some(Self::Reservoir),
            "SEA" => Some(Self::Sea),
            "QUARRY" => Some(Self::Quarry),
            "FOREST" => Some(Self::Forest),
            "FIELD" => Some(Self::Field),
            "SWAMP" => Some(Self::Swamp),
            "MEADOW" => Some(Self::Meadow),
            "MOUNTAINS" => Some(Self::Mountains),
            "GROUNDS" => Some(Self::Grounds),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of gear.
///
/// Rod through net are fishing gear, rifle through backpack hunting gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    /// Rod or spinning rod.
    Rod,
    /// Reel.
    Reel,
    /// Line or braid.
    Line,
    /// Artificial lure.
    Lure,
    /// Natural bait.
    Bait,
    /// Hook.
    Hook,
    /// Float.
    Float,
    /// Landing net.
    Net,
    /// Rifle or shotgun.
    Rifle,
    /// Ammunition.
    Ammo,
    /// Scopes and binoculars.
    Optics,
    /// Game call.
    Call,
    /// Decoy.
    Decoy,
    /// Knife.
    Knife,
    /// Clothing.
    Clothing,
    /// Backpack.
    Backpack,
    /// Anything else.
    Other,
}

impl EquipmentType {
    /// Returns all equipment variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Rod,
            Self::Reel,
            Self::Line,
            Self::Lure,
            Self::Bait,
            Self::Hook,
            Self::Float,
            Self::Net,
            Self::Rifle,
            Self::Ammo,
            Self::Optics,
            Self::Call,
            Self::Decoy,
            Self::Knife,
            Self::Clothing,
            Self::Backpack,
            Self::Other,
        ]
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rod => "ROD",
            Self::Reel => "REEL",
            Self::Line => "LINE",
            Self::Lure => "LURE",
            Self::Bait => "BAIT",
            Self::Hook => "HOOK",
            Self::Float => "FLOAT",
            Self::Net => "NET",
            Self::Rifle => "RIFLE",
            Self::Ammo => "AMMO",
            Self::Optics => "OPTICS",
            Self::Call => "CALL",
            Self::Decoy => "DECOY",
            Self::Knife => "KNIFE",
            Self::Clothing => "CLOTHING",
            Self::Backpack => "BACKPACK",
            Self::Other => "OTHER",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROD" => Some(Self::Rod),
            "REEL" => Some(Self::Reel),
            "LINE" => Some(Self::Line),
            "LURE" => Some(Self::Lure),
            "BAIT" => Some(Self::Bait),
            "HOOK" => Some(Self::Hook),
            "FLOAT" => Some(Self::Float),
            "NET" => Some(Self::Net),
            "RIFLE" => Some(Self::Rifle),
            "AMMO" => Some(Self::Ammo),
            "OPTICS" => Some(Self::Optics),
            "CALL" => Some(Self::Call),
            "DECOY" => Some(Self::Decoy),
            "KNIFE" => Some(Self::Knife),
            "CLOTHING" => Some(Self::Clothing),
            "BACKPACK" => Some(Self::Backpack),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three entity kinds carried by a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A catch or trophy.
    Catch,
    /// A place.
    Location,
    /// A piece of gear.
    Equipment,
}

impl EntityKind {
    /// Returns the lowercase label used in messages and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Catch => "catch",
            Self::Location => "location",
            Self::Equipment => "equipment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
