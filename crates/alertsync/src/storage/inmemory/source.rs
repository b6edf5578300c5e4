//! In-memory paged source.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use alertsync_core::alert::AlertRecord;
use alertsync_core::storage::{AlertSource, ContinuationMarker, Result, ScanPage, StorageError};

/// Serves fixed pages, threading `page-N` markers between them.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pages: Vec<Vec<AlertRecord>>,
    fail_on_page: Option<usize>,
    received: Arc<RwLock<Vec<Option<ContinuationMarker>>>>,
}

impl InMemorySource {
    /// Creates a source serving `pages` in order. No pages behaves like an empty table.
    pub fn new(pages: Vec<Vec<AlertRecord>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Makes the scan of the zero-based page `index` fail.
    pub fn failing_on_page(mut self, index: usize) -> Self {
        self.fail_on_page = Some(index);
        self
    }

    /// Markers received by each scan call, in call order.
    pub async fn received_markers(&self) -> Vec<Option<ContinuationMarker>> {
        self.received.read().await.clone()
    }

    fn marker_for(index: usize) -> ContinuationMarker {
        ContinuationMarker::new(format!("page-{}", index))
    }

    fn index_of(marker: &ContinuationMarker) -> Result<usize> {
        marker
            .as_str()
            .strip_prefix("page-")
            .and_then(|index| index.parse().ok())
            .ok_or_else(|| StorageError::InvalidData(format!("Unknown marker: {}", marker)))
    }
}

#[async_trait]
impl AlertSource for InMemorySource {
    async fn scan(&self, start: Option<&ContinuationMarker>) -> Result<ScanPage> {
        self.received.write().await.push(start.cloned());

        let index = start.map(Self::index_of).transpose()?.unwrap_or(0);
        if self.fail_on_page == Some(index) {
            return Err(StorageError::ConnectionFailed(format!(
                "injected failure on page {}",
                index
            )));
        }

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let continuation = (index + 1 < self.pages.len()).then(|| Self::marker_for(index + 1));

        Ok(ScanPage::new(items, continuation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_are_chained() {
        let source = InMemorySource::new(vec![
            vec![AlertRecord::new("A1")],
            vec![AlertRecord::new("A2")],
        ]);

        let first = source.scan(None).await.unwrap();
        assert_eq!(first.items, vec![AlertRecord::new("A1")]);
        let marker = first.continuation.unwrap();

        let second = source.scan(Some(&marker)).await.unwrap();
        assert_eq!(second.items, vec![AlertRecord::new("A2")]);
        assert!(!second.has_more());

        assert_eq!(source.received_markers().await, vec![None, Some(marker)]);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let page = InMemorySource::default().scan(None).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let source = InMemorySource::new(vec![vec![]]).failing_on_page(0);
        assert!(matches!(
            source.scan(None).await,
            Err(StorageError::ConnectionFailed(_))
        ));
    }
}
