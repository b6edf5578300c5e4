//! Pipeline state machine (Functional Core).
//!
//! ```text
//! Scanning{n} --PageScanned--> Inserting{n}
//! Inserting{n} --PageWritten{has_more: true}--> Scanning{n+1}
//! Inserting{n} --PageWritten{has_more: false}--> Done
//! Scanning | Inserting --Failed--> Failed
//! ```
//!
//! `Done` and `Failed` are terminal.

use std::fmt;

use thiserror::Error;

/// Where a migration run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Reading page `page` (1-based) from the source.
    Scanning { page: u32 },
    /// Writing page `page` into the sink.
    Inserting { page: u32 },
    Done,
    Failed,
}

/// Something that happened while the pipeline was in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    PageScanned,
    PageWritten { has_more: bool },
    Failed,
}

/// A transition the state machine does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid pipeline transition from {from} on {event}")]
pub struct TransitionError {
    pub from: PipelineState,
    pub event: PipelineEvent,
}

impl PipelineState {
    /// The state every run starts in.
    pub fn start() -> Self {
        PipelineState::Scanning { page: 1 }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// The page being processed, if any.
    pub fn page(&self) -> Option<u32> {
        match self {
            PipelineState::Scanning { page } | PipelineState::Inserting { page } => Some(*page),
            PipelineState::Done | PipelineState::Failed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Scanning { .. } => "SCANNING",
            PipelineState::Inserting { .. } => "INSERTING",
            PipelineState::Done => "DONE",
            PipelineState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page() {
            Some(page) => write!(f, "{}(page {})", self.as_str(), page),
            None => f.write_str(self.as_str()),
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::PageScanned => f.write_str("page scanned"),
            PipelineEvent::PageWritten { has_more: true } => f.write_str("page written (more)"),
            PipelineEvent::PageWritten { has_more: false } => f.write_str("page written (last)"),
            PipelineEvent::Failed => f.write_str("failure"),
        }
    }
}

/// Pure function: compute the next state for an event.
pub fn transition(
    state: PipelineState,
    event: PipelineEvent,
) -> Result<PipelineState, TransitionError> {
    match (state, event) {
        (PipelineState::Scanning { page }, PipelineEvent::PageScanned) => {
            Ok(PipelineState::Inserting { page })
        }
        (PipelineState::Inserting { page }, PipelineEvent::PageWritten { has_more: true }) => {
            Ok(PipelineState::Scanning { page: page + 1 })
        }
        (PipelineState::Inserting { .. }, PipelineEvent::PageWritten { has_more: false }) => {
            Ok(PipelineState::Done)
        }
        (PipelineState::Scanning { .. } | PipelineState::Inserting { .. }, PipelineEvent::Failed) => {
            Ok(PipelineState::Failed)
        }
        (from, event) => Err(TransitionError { from, event }),
    }
}
