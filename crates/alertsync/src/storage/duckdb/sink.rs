//! DuckDB sink implementation.
//!
//! Implements `AlertSink` from `alertsync_core::storage` on top of a single
//! owned DuckDB connection.

use std::path::Path;

use async_trait::async_trait;
use duckdb::Connection;
use tracing::{debug, info};

use alertsync_core::alert::AlertRecord;
use alertsync_core::storage::{AlertSink, BatchInsertError, Result, WriteMode};

use super::connection::DuckDbConnection;
use super::conversions::{alert_to_values, row_to_alert};
use super::error::{map_duckdb_error, map_insert_error};
use super::schema;

/// DuckDB-based alert sink.
///
/// Acquired once with [`DuckDbSink::open`] and released once with
/// [`DuckDbSink::close`]; any number of batches can be written in between.
pub struct DuckDbSink {
    conn: DuckDbConnection,
    write_mode: WriteMode,
}

impl DuckDbSink {
    /// Opens (or creates) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = DuckDbConnection::open(path).await?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database. Data is lost when the sink is closed.
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory().await?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: DuckDbConnection) -> Self {
        Self {
            conn,
            write_mode: WriteMode::default(),
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    #[cfg(test)]
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Releases the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await
    }
}

/// Writes `alerts` through one prepared statement, stopping at the first failure.
fn insert_batch(
    conn: &mut Connection,
    sql: &str,
    alerts: &[AlertRecord],
) -> std::result::Result<usize, BatchInsertError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| BatchInsertError::before_first(map_duckdb_error(&e)))?;

    for (inserted, alert) in alerts.iter().enumerate() {
        let values = alert_to_values(alert);
        if let Err(e) = stmt.execute(duckdb::params_from_iter(values)) {
            return Err(BatchInsertError::at_record(
                inserted,
                alert.alert_key.clone(),
                map_insert_error(&e, &alert.alert_key),
            ));
        }
        debug!(alert_key = %alert.alert_key, "Inserted alert");
    }

    Ok(alerts.len())
}

#[async_trait]
impl AlertSink for DuckDbSink {
    async fn ensure_schema(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::CREATE_TABLE)
                    .map_err(|e| map_duckdb_error(&e))
            })
            .await??;

        info!(table = schema::TABLE_NAME, "Schema ready");
        Ok(())
    }

    async fn insert_all(
        &self,
        alerts: &[AlertRecord],
    ) -> std::result::Result<usize, BatchInsertError> {
        if alerts.is_empty() {
            return Ok(0);
        }

        let alerts = alerts.to_vec();
        let sql = schema::insert_statement(self.write_mode);

        self.conn
            .call(move |conn| insert_batch(conn, sql, &alerts))
            .await
            .map_err(BatchInsertError::before_first)?
    }

    async fn query_all(&self) -> Result<Vec<AlertRecord>> {
        let alerts = self
            .conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_ALERTS)
                    .map_err(|e| map_duckdb_error(&e))?;
                let rows = stmt
                    .query_map([], row_to_alert)
                    .map_err(|e| map_duckdb_error(&e))?;

                rows.collect::<duckdb::Result<Vec<_>>>()
                    .map_err(|e| map_duckdb_error(&e))
            })
            .await??;

        info!(rows = alerts.len(), "Read back sink contents");
        for alert in &alerts {
            debug!(?alert, "Sink row");
        }
        Ok(alerts)
    }
}
