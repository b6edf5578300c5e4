//! DuckDB sink implementation.
//!
//! Writes alerts into the `iris_alerts_olap` table of a local DuckDB file and
//! reads them back for verification. DuckDB calls are blocking and run on the
//! tokio blocking pool.

mod connection;
mod conversions;
mod error;
mod schema;
mod sink;

pub use sink::DuckDbSink;
