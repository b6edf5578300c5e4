//! In-memory storage backend for testing.
//!
//! Source and sink doubles that keep everything in collections wrapped in
//! `Arc<RwLock<_>>`. They record how the pipeline drives them (markers
//! received, batches written) and can be told to fail at a given point.

mod sink;
mod source;

pub use sink::InMemorySink;
pub use source::InMemorySource;
