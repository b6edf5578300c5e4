//! Storage backend implementations.
//!
//! Concrete implementations of the `AlertSource` and `AlertSink` traits
//! defined in `alertsync_core::storage`:
//!
//! - `dynamodb`: the source, scanning `iris-alerts` with `aws-sdk-dynamodb`
//! - `duckdb`: the sink and verifier, writing `iris_alerts_olap` with `duckdb`
//! - `inmemory`: test doubles for both traits

pub mod dynamodb;
pub mod duckdb;

#[cfg(test)]
pub mod inmemory;
