//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `alertsync_core::storage`.

use std::fmt::Debug;

use alertsync_core::storage::StorageError;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError;

/// Map a Scan SDK error to StorageError.
///
/// Requests that never reached DynamoDB (dispatch failures, timeouts) become
/// `ConnectionFailed`; service errors become `QueryFailed`.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StorageError {
    if matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    ) {
        return StorageError::ConnectionFailed(DisplayErrorContext(&err).to_string());
    }

    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StorageError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StorageError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StorageError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StorageError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StorageError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}
