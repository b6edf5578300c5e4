//! Orchestration model for a migration run.
//!
//! The runner itself lives next to the concrete backends; this module holds the
//! pure pieces it is built from: the state machine, the run report, the options
//! and the error taxonomy.

mod error;
mod options;
mod report;
mod state;

pub use error::{PipelineError, PipelineFailure};
pub use options::PipelineOptions;
pub use report::RunReport;
pub use state::{transition, PipelineEvent, PipelineState, TransitionError};
