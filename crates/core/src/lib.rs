//! Core of the alertsync migration.
//!
//! Pure types and functions shared by the migration binary and the
//! development tooling: the alert record, timestamp normalization, the
//! storage traits with their error taxonomy, and the pipeline state machine.
//! Nothing in this crate performs I/O.

pub mod alert;
pub mod pipeline;
pub mod storage;
