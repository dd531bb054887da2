//! `SQLite` storage backend.
//!
//! ## Module Structure
//!
//! - [`connection`]: lock acquisition and connection pragmas
//! - [`rows`]: row structs and conversion to domain entities
//! - [`metrics`]: operation counters and latency histograms
//! - [`store`]: the [`SqliteStore`] itself

mod connection;
mod metrics;
mod rows;
mod store;

pub(crate) use connection::{acquire_lock, configure_connection};
pub(crate) use metrics::{record_operation_metrics, status_label};
pub use store::SqliteStore;
