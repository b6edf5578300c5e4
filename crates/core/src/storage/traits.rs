use async_trait::async_trait;

use crate::alert::AlertRecord;

use super::{BatchInsertError, ContinuationMarker, Result, ScanPage};

/// Source of alerts, read one page at a time.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Reads one page, starting after `start` when given.
    async fn scan(&self, start: Option<&ContinuationMarker>) -> Result<ScanPage>;
}

/// Destination store for migrated alerts.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Creates the destination table if it is absent. Never alters rows.
    async fn ensure_schema(&self) -> Result<()>;

    /// Writes the records in order, stopping at the first failure.
    ///
    /// Returns the number of records written.
    async fn insert_all(&self, alerts: &[AlertRecord])
        -> std::result::Result<usize, BatchInsertError>;

    /// Reads back every row in the destination table.
    async fn query_all(&self) -> Result<Vec<AlertRecord>>;
}
