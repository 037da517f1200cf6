//! Storage operation metrics.

use crate::Result;
use std::time::Instant;

/// Records the outcome and latency of a storage operation.
///
/// Emits `deckport_storage_operations_total` and
/// `deckport_storage_operation_duration_ms`, labelled by backend, operation
/// and `status` (`success` or `error`).
pub fn record_operation_metrics<T>(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    result: &Result<T>,
) {
    let status = if result.is_ok() { "success" } else { "error" };
    metrics::counter!(
        "deckport_storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "deckport_storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}
