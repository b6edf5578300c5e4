mod error;
mod operations;
mod timestamp;
mod types;

pub use error::AlertError;
pub use operations::validate_alert;
pub use timestamp::{format_alert_timestamp, parse_alert_timestamp, timestamp_from_epoch};
pub use types::AlertRecord;
