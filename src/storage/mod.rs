//! Storage layer.
//!
//! The backup pipeline talks to storage only through [`EntityStore`];
//! [`SqliteStore`] is the bundled implementation.

// Dropping the connection guard early gains nothing for single statements.
#![allow(clippy::significant_drop_tightening)]

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStore;
pub use traits::{EntityCounts, EntityStore, EntityWriter};
