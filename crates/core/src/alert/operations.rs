use super::{AlertError, AlertRecord};

/// Validates an alert record before it is written to the sink.
pub fn validate_alert(alert: &AlertRecord) -> Result<(), AlertError> {
    if alert.alert_key.trim().is_empty() {
        return Err(AlertError::EmptyKey);
    }
    Ok(())
}
