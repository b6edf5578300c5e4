mod error;
mod traits;
mod types;

pub use error::{BatchInsertError, Result, StorageError};
pub use traits::{AlertSink, AlertSource};
pub use types::{ContinuationMarker, ParseWriteModeError, ScanPage, WriteMode};
