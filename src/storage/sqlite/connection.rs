//! Shared connection handling for `SQLite` backends.

use crate::{Error, Result};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

/// Busy timeout applied to every connection, in milliseconds.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Acquires a mutex lock, recovering from poison.
///
/// A panic inside a previous critical section leaves the connection itself
/// usable, so the inner value is recovered and the event is logged and counted.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("deckport_sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Configures a `SQLite` connection for the study set store.
///
/// # Configuration Applied
///
/// - **WAL mode**: concurrent readers with a single writer
/// - **NORMAL synchronous**
/// - **`busy_timeout`**: waits up to [`BUSY_TIMEOUT_MS`] for locks
/// - **`foreign_keys`**: enforces `terms.study_set_id`
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if foreign keys cannot be enabled.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    // journal_mode returns a row ("wal" or "memory"), so failures are ignored here
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS);

    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| Error::operation("enable_foreign_keys", e))
}
