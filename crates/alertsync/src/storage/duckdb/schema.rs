//! DuckDB schema and statements for the alerts table.

use alertsync_core::storage::WriteMode;

pub const TABLE_NAME: &str = "iris_alerts_olap";

/// Creates the alerts table if it does not exist. Never touches existing rows.
pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS iris_alerts_olap (
    alertKey         VARCHAR(50) NOT NULL PRIMARY KEY,
    idCustomer       INT         DEFAULT NULL,
    customerKey      VARCHAR(50) DEFAULT NULL,
    clientKey        VARCHAR(50) DEFAULT NULL,
    monitoringType   VARCHAR(50) DEFAULT NULL,
    dateAlertCreated DATETIME    DEFAULT NULL,
    status           VARCHAR(50) DEFAULT NULL,
    overallStatus    VARCHAR(50) DEFAULT NULL
);
"#;

/// Strict insert: a duplicate key is a constraint violation.
pub const INSERT_ALERT: &str = r#"
INSERT INTO iris_alerts_olap (
    alertKey, idCustomer, customerKey, clientKey,
    monitoringType, dateAlertCreated, status, overallStatus
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Insert that overwrites every non-key column when the key already exists.
pub const UPSERT_ALERT: &str = r#"
INSERT INTO iris_alerts_olap (
    alertKey, idCustomer, customerKey, clientKey,
    monitoringType, dateAlertCreated, status, overallStatus
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT (alertKey) DO UPDATE SET
    idCustomer = excluded.idCustomer,
    customerKey = excluded.customerKey,
    clientKey = excluded.clientKey,
    monitoringType = excluded.monitoringType,
    dateAlertCreated = excluded.dateAlertCreated,
    status = excluded.status,
    overallStatus = excluded.overallStatus
"#;

/// Every row, ordered by key. Column order matches `row_to_alert`.
pub const SELECT_ALL_ALERTS: &str = r#"
SELECT alertKey, idCustomer, customerKey, clientKey,
       monitoringType, dateAlertCreated, status, overallStatus
FROM iris_alerts_olap
ORDER BY alertKey
"#;

/// Statement used by `insert_all` for the given write mode.
pub fn insert_statement(mode: WriteMode) -> &'static str {
    match mode {
        WriteMode::Upsert => UPSERT_ALERT,
        WriteMode::Insert => INSERT_ALERT,
    }
}
