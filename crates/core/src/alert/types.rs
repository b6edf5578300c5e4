use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A monitoring alert as migrated from the source table into the sink.
///
/// Every optional field is serialized as an explicit `null` when absent so the
/// JSON form always carries the full set of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    /// Unique key of the alert (primary key in the sink).
    pub alert_key: String,
    pub id_customer: Option<i32>,
    pub customer_key: Option<String>,
    pub client_key: Option<String>,
    pub monitoring_type: Option<String>,
    /// Creation time, normalized to a naive UTC timestamp.
    pub date_alert_created: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub overall_status: Option<String>,
}

impl AlertRecord {
    /// Creates a record with only the key set.
    pub fn new(alert_key: impl Into<String>) -> Self {
        Self {
            alert_key: alert_key.into(),
            id_customer: None,
            customer_key: None,
            client_key: None,
            monitoring_type: None,
            date_alert_created: None,
            status: None,
            overall_status: None,
        }
    }

    pub fn with_id_customer(mut self, id_customer: i32) -> Self {
        self.id_customer = Some(id_customer);
        self
    }

    pub fn with_customer_key(mut self, customer_key: impl Into<String>) -> Self {
        self.customer_key = Some(customer_key.into());
        self
    }

    pub fn with_client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = Some(client_key.into());
        self
    }

    pub fn with_monitoring_type(mut self, monitoring_type: impl Into<String>) -> Self {
        self.monitoring_type = Some(monitoring_type.into());
        self
    }

    pub fn with_date_alert_created(mut self, created: NaiveDateTime) -> Self {
        self.date_alert_created = Some(created);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_overall_status(mut self, overall_status: impl Into<String>) -> Self {
        self.overall_status = Some(overall_status.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_sets_only_key() {
        let alert = AlertRecord::new("A1");

        assert_eq!(alert.alert_key, "A1");
        assert_eq!(alert.id_customer, None);
        assert_eq!(alert.customer_key, None);
        assert_eq!(alert.client_key, None);
        assert_eq!(alert.monitoring_type, None);
        assert_eq!(alert.date_alert_created, None);
        assert_eq!(alert.status, None);
        assert_eq!(alert.overall_status, None);
    }

    #[test]
    fn test_builder_sets_fields() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();

        let alert = AlertRecord::new("A2")
            .with_id_customer(9)
            .with_customer_key("CUST-9")
            .with_monitoring_type("PRICE")
            .with_date_alert_created(created)
            .with_status("CLOSED")
            .with_overall_status("RESOLVED");

        assert_eq!(alert.id_customer, Some(9));
        assert_eq!(alert.customer_key.as_deref(), Some("CUST-9"));
        assert_eq!(alert.monitoring_type.as_deref(), Some("PRICE"));
        assert_eq!(alert.date_alert_created, Some(created));
        assert_eq!(alert.status.as_deref(), Some("CLOSED"));
        assert_eq!(alert.overall_status.as_deref(), Some("RESOLVED"));
    }

    #[test]
    fn test_json_keeps_absent_fields_as_null() {
        let alert = AlertRecord::new("A1").with_status("OPEN");

        let json = serde_json::to_value(&alert).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 8);
        assert_eq!(object["alertKey"], "A1");
        assert_eq!(object["status"], "OPEN");
        for key in [
            "idCustomer",
            "customerKey",
            "clientKey",
            "monitoringType",
            "dateAlertCreated",
            "overallStatus",
        ] {
            assert!(object[key].is_null(), "{key} should be null");
        }
    }
}
