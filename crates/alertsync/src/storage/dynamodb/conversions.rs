//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting scanned items into alert records and for
//! turning `LastEvaluatedKey` maps into opaque continuation markers and back.
//! These are testable in isolation without DynamoDB access.

use std::collections::{BTreeMap, HashMap};

use alertsync_core::alert::{parse_alert_timestamp, timestamp_from_epoch, AlertRecord};
use alertsync_core::storage::{ContinuationMarker, StorageError};
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Projection
// ============================================================================

/// Attribute holding the alert key (the table's sort key).
pub const ALERT_KEY_ATTRIBUTE: &str = "sk";

/// Attributes read by every scan. `clientKey` is intentionally absent.
pub const PROJECTION_EXPRESSION: &str =
    "#alertKey, #idCustomer, #customerKey, #dateAlertCreated, #monitoringType, #status, #overallStatus";

const PROJECTION_NAMES: [(&str, &str); 7] = [
    ("#alertKey", ALERT_KEY_ATTRIBUTE),
    ("#idCustomer", "idCustomer"),
    ("#customerKey", "customerKey"),
    ("#dateAlertCreated", "dateAlertCreated"),
    ("#monitoringType", "monitoringType"),
    ("#status", "status"),
    ("#overallStatus", "overallStatus"),
];

/// `ExpressionAttributeNames` for [`PROJECTION_EXPRESSION`].
pub fn projection_attribute_names() -> HashMap<String, String> {
    PROJECTION_NAMES
        .iter()
        .map(|(placeholder, name)| (placeholder.to_string(), name.to_string()))
        .collect()
}

// ============================================================================
// Alert conversions
// ============================================================================

/// Convert a scanned DynamoDB item to an AlertRecord.
pub fn item_to_alert(item: &HashMap<String, AttributeValue>) -> Result<AlertRecord, StorageError> {
    Ok(AlertRecord {
        alert_key: get_string(item, ALERT_KEY_ATTRIBUTE)?,
        id_customer: get_optional_int(item, "idCustomer")?,
        customer_key: get_optional_string(item, "customerKey")?,
        client_key: get_optional_string(item, "clientKey")?,
        monitoring_type: get_optional_string(item, "monitoringType")?,
        date_alert_created: get_optional_timestamp(item, "dateAlertCreated")?,
        status: get_optional_string(item, "status")?,
        overall_status: get_optional_string(item, "overallStatus")?,
    })
}

// ============================================================================
// Continuation markers
// ============================================================================

/// Key attribute value as carried inside a continuation marker.
///
/// Serializes as `{"S": "..."}` / `{"N": "..."}`, the same shape DynamoDB uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum KeyValue {
    S(String),
    N(String),
}

/// Encode a `LastEvaluatedKey` as a continuation marker.
///
/// An absent or empty key means the scan is complete.
pub fn key_to_marker(
    key: Option<&HashMap<String, AttributeValue>>,
) -> Result<Option<ContinuationMarker>, StorageError> {
    let Some(key) = key.filter(|key| !key.is_empty()) else {
        return Ok(None);
    };

    let mut encoded = BTreeMap::new();
    for (name, value) in key {
        let value = match value {
            AttributeValue::S(s) => KeyValue::S(s.clone()),
            AttributeValue::N(n) => KeyValue::N(n.clone()),
            _ => {
                return Err(StorageError::InvalidData(format!(
                    "Unsupported key attribute type: {}",
                    name
                )))
            }
        };
        encoded.insert(name.clone(), value);
    }

    serde_json::to_string(&encoded)
        .map(|token| Some(ContinuationMarker::new(token)))
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a continuation marker back into an `ExclusiveStartKey`.
pub fn marker_to_key(
    marker: &ContinuationMarker,
) -> Result<HashMap<String, AttributeValue>, StorageError> {
    let decoded: BTreeMap<String, KeyValue> = serde_json::from_str(marker.as_str())
        .map_err(|e| StorageError::Serialization(format!("Invalid continuation marker: {}", e)))?;

    Ok(decoded
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                KeyValue::S(s) => AttributeValue::S(s),
                KeyValue::N(n) => AttributeValue::N(n),
            };
            (name, value)
        })
        .collect())
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StorageError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StorageError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute. `NULL` and absent are both `None`.
fn get_optional_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<String>, StorageError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid_type(key, "string")),
    }
}

/// Get an optional integer attribute, stored either as a number or a numeric string.
fn get_optional_int(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<i32>, StorageError> {
    let raw = match item.get(key) {
        None | Some(AttributeValue::Null(_)) => return Ok(None),
        Some(AttributeValue::N(n)) => n,
        Some(AttributeValue::S(s)) => s,
        Some(_) => return Err(invalid_type(key, "number")),
    };

    raw.trim()
        .parse::<i32>()
        .map(Some)
        .map_err(|e| StorageError::InvalidData(format!("Invalid integer {}: {}", key, e)))
}

/// Get an optional timestamp attribute, stored as a date string or an epoch number.
fn get_optional_timestamp(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<NaiveDateTime>, StorageError> {
    let parsed = match item.get(key) {
        None | Some(AttributeValue::Null(_)) => return Ok(None),
        Some(AttributeValue::S(s)) => parse_alert_timestamp(s),
        Some(AttributeValue::N(n)) => {
            let epoch = n.trim().parse::<i64>().map_err(|e| {
                StorageError::InvalidData(format!("Invalid epoch {}: {}", key, e))
            })?;
            timestamp_from_epoch(epoch)
        }
        Some(_) => return Err(invalid_type(key, "string or number")),
    };

    parsed
        .map(Some)
        .map_err(|e| StorageError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

fn invalid_type(key: &str, expected: &str) -> StorageError {
    StorageError::InvalidData(format!("Invalid field {}: expected {}", key, expected))
}
