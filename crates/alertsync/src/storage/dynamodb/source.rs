//! DynamoDB source: one `Scan` call per page.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use alertsync_core::alert::AlertRecord;
use alertsync_core::storage::{AlertSource, ContinuationMarker, Result, ScanPage, StorageError};

use super::conversions::{
    item_to_alert, key_to_marker, marker_to_key, projection_attribute_names,
    PROJECTION_EXPRESSION,
};
use super::error::map_scan_error;

/// Reads alerts from a DynamoDB table with a fixed projection.
pub struct DynamoDbSource {
    client: Client,
    table_name: String,
    page_size: Option<i32>,
}

impl DynamoDbSource {
    /// Creates a new source with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            page_size: None,
        }
    }

    /// Caps the number of items evaluated per scan page.
    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl AlertSource for DynamoDbSource {
    async fn scan(&self, start: Option<&ContinuationMarker>) -> Result<ScanPage> {
        let exclusive_start_key = start.map(marker_to_key).transpose()?;

        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .projection_expression(PROJECTION_EXPRESSION)
            .set_expression_attribute_names(Some(projection_attribute_names()))
            .set_limit(self.page_size)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = output
            .items()
            .iter()
            .map(|item| {
                item_to_alert(item).map_err(|e| {
                    debug!(?item, error = %e, "Rejected scanned item");
                    e
                })
            })
            .collect::<Result<Vec<AlertRecord>>>()?;

        for alert in &items {
            let json = serde_json::to_string(alert)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            debug!(alert = %json, "Scanned alert");
        }

        let continuation = key_to_marker(output.last_evaluated_key())?;
        debug!(
            table = %self.table_name,
            items = items.len(),
            continuation = continuation.as_ref().map(|m| m.as_str()),
            "Scanned page"
        );

        Ok(ScanPage::new(items, continuation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_runtime_api::client::orchestrator::{HttpRequest, HttpResponse};
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use serde_json::{json, Value};

    /// A canned `Scan` response. The request half is ignored; requests are
    /// inspected afterwards through `actual_requests`.
    fn scan_response(body: Value) -> ReplayEvent {
        ReplayEvent::new(
            HttpRequest::new(SdkBody::empty()),
            HttpResponse::new(
                StatusCode::try_from(200).unwrap(),
                SdkBody::from(body.to_string()),
            ),
        )
    }

    fn replay_client(responses: Vec<ReplayEvent>) -> (Client, StaticReplayClient) {
        let http_client = StaticReplayClient::new(responses);
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
            .http_client(http_client.clone())
            .build();

        (Client::from_conf(config), http_client)
    }

    fn sent_bodies(http_client: &StaticReplayClient) -> Vec<Value> {
        http_client
            .actual_requests()
            .map(|request| {
                assert_eq!(
                    request.headers().get("x-amz-target"),
                    Some("DynamoDB_20120810.Scan")
                );
                serde_json::from_slice(request.body().bytes().unwrap()).unwrap()
            })
            .collect()
    }

    fn last_evaluated_key() -> Value {
        json!({ "pk": { "S": "CUSTOMER#C7" }, "sk": { "S": "A1" } })
    }

    #[tokio::test]
    async fn test_scan_threads_last_evaluated_key_into_next_request() {
        let (client, http_client) = replay_client(vec![
            scan_response(json!({
                "Items": [{
                    "sk": { "S": "A1" },
                    "idCustomer": { "N": "7" },
                    "status": { "S": "OPEN" }
                }],
                "Count": 1,
                "ScannedCount": 1,
                "LastEvaluatedKey": last_evaluated_key()
            })),
            scan_response(json!({
                "Items": [{ "sk": { "S": "A2" } }],
                "Count": 1,
                "ScannedCount": 1
            })),
        ]);
        let source = DynamoDbSource::new(client, "iris-alerts").with_page_size(Some(1));

        let first = source.scan(None).await.unwrap();
        assert_eq!(
            first.items,
            vec![AlertRecord::new("A1").with_id_customer(7).with_status("OPEN")]
        );
        assert!(first.has_more());

        let second = source.scan(first.continuation.as_ref()).await.unwrap();
        assert_eq!(second.items, vec![AlertRecord::new("A2")]);
        assert!(!second.has_more());

        let bodies = sent_bodies(&http_client);
        assert_eq!(bodies.len(), 2);

        let expected_names: Value = serde_json::to_value(projection_attribute_names()).unwrap();
        for body in &bodies {
            assert_eq!(body["TableName"], "iris-alerts");
            assert_eq!(body["ProjectionExpression"], PROJECTION_EXPRESSION);
            assert_eq!(body["ExpressionAttributeNames"], expected_names);
            assert_eq!(body["Limit"], 1);
        }

        assert!(bodies[0].get("ExclusiveStartKey").is_none());
        assert_eq!(bodies[1]["ExclusiveStartKey"], last_evaluated_key());
    }

    #[tokio::test]
    async fn test_scan_without_page_size_sends_no_limit() {
        let (client, http_client) = replay_client(vec![scan_response(json!({
            "Items": [],
            "Count": 0,
            "ScannedCount": 0
        }))]);
        let source = DynamoDbSource::new(client, "iris-alerts");

        let page = source.scan(None).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more());

        let bodies = sent_bodies(&http_client);
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].get("Limit").is_none());
    }

    #[tokio::test]
    async fn test_scan_rejects_item_without_key() {
        let (client, _http_client) = replay_client(vec![scan_response(json!({
            "Items": [{ "status": { "S": "OPEN" } }],
            "Count": 1,
            "ScannedCount": 1
        }))]);
        let source = DynamoDbSource::new(client, "iris-alerts");

        match source.scan(None).await {
            Err(StorageError::InvalidData(message)) => {
                assert!(message.contains("sk"), "got: {message}")
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }
}
