use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alert::AlertRecord;

/// Opaque token telling the source where the next scan page starts.
///
/// The content is owned by the source implementation; callers only thread
/// it from one page into the next scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationMarker(String);

impl ContinuationMarker {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a source scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub items: Vec<AlertRecord>,
    /// Present when more data remains after this page.
    pub continuation: Option<ContinuationMarker>,
}

impl ScanPage {
    pub fn new(items: Vec<AlertRecord>, continuation: Option<ContinuationMarker>) -> Self {
        Self {
            items,
            continuation,
        }
    }

    /// Returns true if the source reported more data after this page.
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

/// How the sink treats a record whose key is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Overwrite the existing row.
    #[default]
    Upsert,
    /// Reject the record with an `AlreadyExists` error.
    Insert,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Upsert => "upsert",
            WriteMode::Insert => "insert",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown write mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown write mode '{0}' (expected 'upsert' or 'insert')")]
pub struct ParseWriteModeError(String);

impl FromStr for WriteMode {
    type Err = ParseWriteModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(WriteMode::Upsert),
            "insert" => Ok(WriteMode::Insert),
            other => Err(ParseWriteModeError(other.to_string())),
        }
    }
}
