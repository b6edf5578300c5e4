//! Owned DuckDB connection with an explicit, single release.

use std::path::Path;
use std::sync::{Arc, Mutex};

use alertsync_core::storage::{Result, StorageError};
use duckdb::Connection;
use tracing::debug;

use super::error::map_open_error;

/// A DuckDB connection shared with the blocking pool.
///
/// The connection sits in an `Option` slot: `close` takes it out, after which
/// every `call` fails with `StorageError::ConnectionClosed`. If `close` is
/// never reached the connection is released when the last handle drops.
pub struct DuckDbConnection {
    slot: Arc<Mutex<Option<Connection>>>,
}

impl DuckDbConnection {
    /// Opens (or creates) a database file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = tokio::task::spawn_blocking(move || Connection::open(&path))
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
            .map_err(|e| map_open_error(&e))?;

        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database.
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let conn = tokio::task::spawn_blocking(Connection::open_in_memory)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
            .map_err(|e| map_open_error(&e))?;

        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(conn))),
        }
    }

    /// Runs `f` against the connection on the blocking pool.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Connection) -> R + Send + 'static,
        R: Send + 'static,
    {
        let slot = Arc::clone(&self.slot);
        tokio::task::spawn_blocking(move || {
            let mut guard = slot
                .lock()
                .map_err(|_| StorageError::ConnectionFailed("Connection lock poisoned".to_string()))?;
            let conn = guard.as_mut().ok_or(StorageError::ConnectionClosed)?;
            Ok(f(conn))
        })
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Blocking task failed: {}", e)))?
    }

    /// Closes the connection. Closing an already closed connection is a no-op.
    pub async fn close(&self) -> Result<()> {
        let slot = Arc::clone(&self.slot);
        tokio::task::spawn_blocking(move || {
            let taken = slot
                .lock()
                .map_err(|_| StorageError::ConnectionFailed("Connection lock poisoned".to_string()))?
                .take();

            match taken {
                Some(conn) => {
                    debug!("Closing DuckDB connection");
                    conn.close().map_err(|(_, e)| {
                        StorageError::ConnectionFailed(format!("Failed to close database: {}", e))
                    })
                }
                None => Ok(()),
            }
        })
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Blocking task failed: {}", e)))?
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.slot.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_runs_against_connection() {
        let conn = DuckDbConnection::open_in_memory().await.unwrap();

        let answer = conn
            .call(|conn| conn.query_row("SELECT 40 + 2", [], |row| row.get::<_, i32>(0)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(answer, 42);
        assert!(!conn.is_closed());
    }

    #[tokio::test]
    async fn test_call_after_close_fails() {
        let conn = DuckDbConnection::open_in_memory().await.unwrap();

        conn.close().await.unwrap();

        assert!(conn.is_closed());
        let result = conn.call(|_| ()).await;
        assert_eq!(result, Err(StorageError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_close_twice_is_noop() {
        let conn = DuckDbConnection::open_in_memory().await.unwrap();

        conn.close().await.unwrap();
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("alerts.db");

        let result = DuckDbConnection::open(&path).await;

        assert!(matches!(result, Err(StorageError::ConnectionFailed(_))));
    }
}
