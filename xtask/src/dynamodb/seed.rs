//! Seed command implementation.

use super::error::{DynamodbError, Result};
use alertsync_core::alert::{format_alert_timestamp, AlertRecord};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

const MONITORING_TYPES: [&str; 4] = ["PRICE", "STOCK", "AVAILABILITY", "CONTENT"];
const STATUSES: [&str; 3] = ["OPEN", "ACKNOWLEDGED", "CLOSED"];
const OVERALL_STATUSES: [&str; 2] = ["ACTIVE", "RESOLVED"];
const CUSTOMERS: u32 = 5;

/// Maximum number of items in one BatchWriteItem request.
const BATCH_SIZE: usize = 25;

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Generate `count` deterministic mock alerts.
///
/// Alerts rotate across a handful of customers, monitoring types and statuses;
/// every seventh alert has no status so the migration sees missing attributes.
pub fn generate_seed_alerts(count: u32) -> Vec<AlertRecord> {
    (0..count)
        .map(|i| {
            let customer = i % CUSTOMERS + 1;
            let mut alert = AlertRecord::new(format!("ALERT-{:05}", i + 1))
                .with_id_customer(customer as i32)
                .with_customer_key(format!("CUST-{:03}", customer))
                .with_client_key(format!("CLIENT-{:03}", i % 3 + 1))
                .with_monitoring_type(MONITORING_TYPES[i as usize % MONITORING_TYPES.len()])
                .with_date_alert_created(base_time() + Duration::hours(i as i64 * 7))
                .with_overall_status(OVERALL_STATUSES[i as usize % OVERALL_STATUSES.len()]);

            if i % 7 != 6 {
                alert = alert.with_status(STATUSES[i as usize % STATUSES.len()]);
            }
            alert
        })
        .collect()
}

/// Convert an alert to a DynamoDB item.
///
/// Every fifth alert stores its creation time as epoch milliseconds instead of
/// an RFC 3339 string, matching the mixed data found in the real table.
pub fn alert_to_item(index: usize, alert: &AlertRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    let customer_key = alert.customer_key.clone().unwrap_or_default();
    item.insert(
        "pk".to_string(),
        AttributeValue::S(format!("CUSTOMER#{}", customer_key)),
    );
    item.insert("sk".to_string(), AttributeValue::S(alert.alert_key.clone()));

    if let Some(id) = alert.id_customer {
        item.insert("idCustomer".to_string(), AttributeValue::N(id.to_string()));
    }
    let strings = [
        ("customerKey", &alert.customer_key),
        ("clientKey", &alert.client_key),
        ("monitoringType", &alert.monitoring_type),
        ("status", &alert.status),
        ("overallStatus", &alert.overall_status),
    ];
    for (name, value) in strings {
        if let Some(value) = value {
            item.insert(name.to_string(), AttributeValue::S(value.clone()));
        }
    }

    if let Some(created) = &alert.date_alert_created {
        let value = if index % 5 == 4 {
            AttributeValue::N(created.and_utc().timestamp_millis().to_string())
        } else {
            AttributeValue::S(format_alert_timestamp(created))
        };
        item.insert("dateAlertCreated".to_string(), value);
    }

    item
}

/// Insert alerts into DynamoDB.
pub async fn seed_alerts(client: &Client, table_name: &str, alerts: &[AlertRecord]) -> Result<u32> {
    let mut inserted = 0;

    for (chunk_index, chunk) in alerts.chunks(BATCH_SIZE).enumerate() {
        let write_requests = chunk
            .iter()
            .enumerate()
            .map(|(offset, alert)| {
                let item = alert_to_item(chunk_index * BATCH_SIZE + offset, alert);
                let put = PutRequest::builder()
                    .set_item(Some(item))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed: usize = output
            .unprocessed_items()
            .map(|items| items.values().map(Vec::len).sum())
            .unwrap_or(0);
        if unprocessed > 0 {
            return Err(DynamodbError::UnprocessedItems(unprocessed));
        }

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}
