use thiserror::Error;

use super::{RunReport, TransitionError};
use crate::alert::AlertError;
use crate::storage::{BatchInsertError, StorageError};

/// Why a migration run stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read page {page} from source: {source}")]
    SourceRead { page: u32, source: StorageError },

    #[error("Failed to prepare sink schema: {0}")]
    Schema(#[source] StorageError),

    #[error("Invalid alert on page {page}: {source}")]
    InvalidAlert { page: u32, source: AlertError },

    #[error("Failed to write page {page}: {source}")]
    Insert { page: u32, source: BatchInsertError },

    #[error("Failed to verify sink contents: {0}")]
    Verify(#[source] StorageError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl PipelineError {
    /// Short machine-readable tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::SourceRead { .. } => "source_read",
            PipelineError::Schema(_) => "schema",
            PipelineError::InvalidAlert { .. } => "invalid_alert",
            PipelineError::Insert { .. } => "insert",
            PipelineError::Verify(_) => "verify",
            PipelineError::Transition(_) => "transition",
        }
    }
}

/// A failed run together with the progress made before it failed.
#[derive(Debug, Error)]
#[error(
    "{error} (pages scanned: {}, items written: {})",
    .report.pages_scanned,
    .report.items_written
)]
pub struct PipelineFailure {
    #[source]
    pub error: PipelineError,
    pub report: RunReport,
}

impl PipelineFailure {
    pub fn new(error: PipelineError, report: RunReport) -> Self {
        Self { error, report }
    }
}
