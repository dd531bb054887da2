//! Metrics recording for the `SQLite` store.

use std::time::Instant;

/// Records operation metrics for a store operation.
///
/// Emits `storage_operations_total` (counter) and
/// `storage_operation_duration_ms` (histogram), both labelled by backend,
/// operation and status. Without an installed recorder these are no-ops.
///
/// # Examples
///
/// ```ignore
/// let start = Instant::now();
/// let result = insert();
/// let status = if result.is_ok() { "success" } else { "error" };
/// record_operation_metrics("sqlite", "insert_catch", start, status);
/// ```
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

/// Returns the metrics status label for a result.
pub const fn status_label<T, E>(result: &std::result::Result<T, E>) -> &'static str {
    if result.is_ok() { "success" } else { "error" }
}
