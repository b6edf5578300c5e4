//! DuckDB error mapping.
//!
//! Maps `duckdb::Error` to `StorageError` from `alertsync_core::storage`.
//! DuckDB reports constraint violations only through the message text, so
//! primary-key violations are recognized by message.

use alertsync_core::storage::StorageError;

const DUPLICATE_KEY_MARKERS: [&str; 3] = [
    "Duplicate key",
    "violates primary key constraint",
    "PRIMARY KEY or UNIQUE constraint violated",
];

/// Maps a DuckDB error that is not tied to a specific record.
pub fn map_duckdb_error(err: &duckdb::Error) -> StorageError {
    StorageError::QueryFailed(err.to_string())
}

/// Maps a DuckDB error raised while writing the alert `alert_key`.
///
/// - primary-key violation → `StorageError::AlreadyExists`
/// - anything else → `StorageError::QueryFailed`
pub fn map_insert_error(err: &duckdb::Error, alert_key: &str) -> StorageError {
    let message = err.to_string();
    if DUPLICATE_KEY_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
    {
        StorageError::AlreadyExists {
            entity_type: "Alert",
            id: alert_key.to_string(),
        }
    } else {
        StorageError::QueryFailed(message)
    }
}

/// Maps a failure to open the database file.
pub fn map_open_error(err: &duckdb::Error) -> StorageError {
    StorageError::ConnectionFailed(format!("Cannot open database: {}", err))
}
