use thiserror::Error;

/// Errors that can occur while reading from the source or writing to the sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Connection already closed")]
    ConnectionClosed,
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A batch insert that stopped at its first failing record.
///
/// Records written before the failure stay committed; records after it were
/// never attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("insert stopped after {inserted} record(s){}: {source}", failing_key_suffix(.alert_key))]
pub struct BatchInsertError {
    /// Number of records committed before the failure.
    pub inserted: usize,
    /// Key of the failing record, if the failure happened on a record.
    pub alert_key: Option<String>,
    pub source: StorageError,
}

impl BatchInsertError {
    /// A failure that happened before any record was attempted.
    pub fn before_first(source: StorageError) -> Self {
        Self {
            inserted: 0,
            alert_key: None,
            source,
        }
    }

    /// A failure on a specific record after `inserted` successful writes.
    pub fn at_record(inserted: usize, alert_key: impl Into<String>, source: StorageError) -> Self {
        Self {
            inserted,
            alert_key: Some(alert_key.into()),
            source,
        }
    }
}

fn failing_key_suffix(alert_key: &Option<String>) -> String {
    match alert_key {
        Some(key) => format!(" at '{key}'"),
        None => String::new(),
    }
}
