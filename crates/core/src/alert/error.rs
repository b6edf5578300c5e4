use thiserror::Error;

/// Errors that can occur when building or validating an alert record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("Alert key cannot be empty")]
    EmptyKey,
    #[error("Invalid alert timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Epoch value out of range: {0}")]
    EpochOutOfRange(i64),
}
