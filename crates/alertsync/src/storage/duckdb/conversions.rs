//! DuckDB value conversion functions.
//!
//! Pure functions for binding alert records as statement parameters and
//! reading them back from result rows.

use alertsync_core::alert::AlertRecord;
use chrono::{DateTime, NaiveDateTime};
use duckdb::types::{TimeUnit, Type, Value};
use duckdb::Row;

/// Column index of `dateAlertCreated` in `SELECT_ALL_ALERTS`.
const DATE_ALERT_CREATED_COLUMN: usize = 5;

/// Convert an AlertRecord to statement parameters in column order.
pub fn alert_to_values(alert: &AlertRecord) -> Vec<Value> {
    vec![
        Value::Text(alert.alert_key.clone()),
        alert.id_customer.map(Value::Int).unwrap_or(Value::Null),
        optional_text(&alert.customer_key),
        optional_text(&alert.client_key),
        optional_text(&alert.monitoring_type),
        alert
            .date_alert_created
            .map(|dt| Value::Timestamp(TimeUnit::Microsecond, dt.and_utc().timestamp_micros()))
            .unwrap_or(Value::Null),
        optional_text(&alert.status),
        optional_text(&alert.overall_status),
    ]
}

/// Convert a result row to an AlertRecord.
pub fn row_to_alert(row: &Row<'_>) -> duckdb::Result<AlertRecord> {
    Ok(AlertRecord {
        alert_key: row.get(0)?,
        id_customer: row.get(1)?,
        customer_key: row.get(2)?,
        client_key: row.get(3)?,
        monitoring_type: row.get(4)?,
        date_alert_created: value_to_timestamp(row.get(DATE_ALERT_CREATED_COLUMN)?)?,
        status: row.get(6)?,
        overall_status: row.get(7)?,
    })
}

fn optional_text(value: &Option<String>) -> Value {
    value.clone().map(Value::Text).unwrap_or(Value::Null)
}

fn value_to_timestamp(value: Value) -> duckdb::Result<Option<NaiveDateTime>> {
    let micros = match value {
        Value::Null => return Ok(None),
        Value::Timestamp(unit, raw) => match unit {
            TimeUnit::Second => raw.saturating_mul(1_000_000),
            TimeUnit::Millisecond => raw.saturating_mul(1_000),
            TimeUnit::Microsecond => raw,
            TimeUnit::Nanosecond => raw / 1_000,
        },
        other => {
            return Err(conversion_failure(format!(
                "expected a timestamp, got {:?}",
                other
            )))
        }
    };

    DateTime::from_timestamp_micros(micros)
        .map(|dt| Some(dt.naive_utc()))
        .ok_or_else(|| conversion_failure(format!("timestamp out of range: {}", micros)))
}

fn conversion_failure(message: String) -> duckdb::Error {
    duckdb::Error::FromSqlConversionFailure(
        DATE_ALERT_CREATED_COLUMN,
        Type::Timestamp,
        message.into(),
    )
}
