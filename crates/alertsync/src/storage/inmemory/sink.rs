//! In-memory sink keyed by alert key.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use alertsync_core::alert::AlertRecord;
use alertsync_core::storage::{AlertSink, BatchInsertError, Result, StorageError, WriteMode};

/// Stores rows in a `BTreeMap` so `query_all` comes back ordered by key.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    rows: Arc<RwLock<BTreeMap<String, AlertRecord>>>,
    batches: Arc<RwLock<Vec<Vec<String>>>>,
    write_mode: WriteMode,
    fail_schema: bool,
    fail_on_key: Option<String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Makes `ensure_schema` fail.
    pub fn failing_schema(mut self) -> Self {
        self.fail_schema = true;
        self
    }

    /// Makes the write of `alert_key` fail.
    pub fn failing_on_key(mut self, alert_key: impl Into<String>) -> Self {
        self.fail_on_key = Some(alert_key.into());
        self
    }

    /// Keys handed to each `insert_all` call, in call order.
    pub async fn batches(&self) -> Vec<Vec<String>> {
        self.batches.read().await.clone()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.rows.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl AlertSink for InMemorySink {
    async fn ensure_schema(&self) -> Result<()> {
        if self.fail_schema {
            return Err(StorageError::QueryFailed(
                "injected schema failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn insert_all(
        &self,
        alerts: &[AlertRecord],
    ) -> std::result::Result<usize, BatchInsertError> {
        self.batches
            .write()
            .await
            .push(alerts.iter().map(|a| a.alert_key.clone()).collect());

        let mut rows = self.rows.write().await;
        for (inserted, alert) in alerts.iter().enumerate() {
            if self.fail_on_key.as_deref() == Some(alert.alert_key.as_str()) {
                return Err(BatchInsertError::at_record(
                    inserted,
                    alert.alert_key.clone(),
                    StorageError::QueryFailed("injected insert failure".to_string()),
                ));
            }
            if self.write_mode == WriteMode::Insert && rows.contains_key(&alert.alert_key) {
                return Err(BatchInsertError::at_record(
                    inserted,
                    alert.alert_key.clone(),
                    StorageError::AlreadyExists {
                        entity_type: "Alert",
                        id: alert.alert_key.clone(),
                    },
                ));
            }
            rows.insert(alert.alert_key.clone(), alert.clone());
        }

        Ok(alerts.len())
    }

    async fn query_all(&self) -> Result<Vec<AlertRecord>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_strict_mode_rejects_existing_key() {
        let sink = InMemorySink::new().with_write_mode(WriteMode::Insert);
        sink.insert_all(&[AlertRecord::new("A1")]).await.unwrap();

        let err = sink
            .insert_all(&[AlertRecord::new("A0"), AlertRecord::new("A1")])
            .await
            .unwrap_err();

        assert_eq!(err.inserted, 1);
        assert_eq!(sink.keys().await, vec!["A0", "A1"]);
    }

    #[tokio::test]
    async fn test_upsert_mode_overwrites() {
        let sink = InMemorySink::new();
        sink.insert_all(&[AlertRecord::new("A1")]).await.unwrap();

        let updated = AlertRecord::new("A1").with_status("CLOSED");
        sink.insert_all(&[updated.clone()]).await.unwrap();

        assert_eq!(sink.query_all().await.unwrap(), vec![updated]);
        assert_eq!(sink.batches().await.len(), 2);
    }
}
