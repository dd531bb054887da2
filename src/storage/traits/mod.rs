//! Storage backend traits.

mod entity;

pub use entity::{EntityCounts, EntityStore, EntityWriter};
