//! Migration runner (Imperative Shell).
//!
//! Drives the state machine from `alertsync_core::pipeline` against a source
//! and a sink: scan a page, write it, thread the continuation marker into the
//! next scan, until the source is drained or the page limit is hit.

use tracing::{debug, error, info, warn};

use alertsync_core::alert::validate_alert;
use alertsync_core::pipeline::{
    transition, PipelineError, PipelineEvent, PipelineFailure, PipelineOptions, PipelineState,
    RunReport,
};
use alertsync_core::storage::{AlertSink, AlertSource, ContinuationMarker};

/// Runs one migration.
///
/// The sink is neither opened nor closed here; the caller owns its lifetime.
/// On failure the partial report travels with the error.
pub async fn run(
    source: &dyn AlertSource,
    sink: &dyn AlertSink,
    options: &PipelineOptions,
) -> Result<RunReport, PipelineFailure> {
    let mut state = PipelineState::start();
    let mut report = RunReport::default();

    match drive(source, sink, options, &mut state, &mut report).await {
        Ok(()) => {
            info!(
                pages = report.pages_scanned,
                scanned = report.items_scanned,
                written = report.items_written,
                truncated = report.truncated,
                verified = report.verified_rows,
                "Migration complete"
            );
            Ok(report)
        }
        Err(err) => {
            if !state.is_terminal() {
                state = transition(state, PipelineEvent::Failed).unwrap_or(PipelineState::Failed);
            }
            error!(
                kind = err.kind(),
                state = %state,
                pages = report.pages_scanned,
                written = report.items_written,
                error = %err,
                "Migration failed"
            );
            Err(PipelineFailure::new(err, report))
        }
    }
}

async fn drive(
    source: &dyn AlertSource,
    sink: &dyn AlertSink,
    options: &PipelineOptions,
    state: &mut PipelineState,
    report: &mut RunReport,
) -> Result<(), PipelineError> {
    sink.ensure_schema().await.map_err(PipelineError::Schema)?;

    let mut start: Option<ContinuationMarker> = None;

    while let PipelineState::Scanning { page } = *state {
        let scanned = source
            .scan(start.as_ref())
            .await
            .map_err(|source| PipelineError::SourceRead { page, source })?;
        report.record_page(scanned.items.len());
        *state = transition(*state, PipelineEvent::PageScanned)?;
        debug!(state = %state, items = scanned.items.len(), "Page scanned");

        for alert in &scanned.items {
            validate_alert(alert).map_err(|source| PipelineError::InvalidAlert { page, source })?;
        }

        let written = sink.insert_all(&scanned.items).await.map_err(|source| {
            report.record_written(source.inserted);
            PipelineError::Insert { page, source }
        })?;
        report.record_written(written);

        let limit_reached = options.page_limit_reached(page);
        if scanned.has_more() && limit_reached {
            report.truncated = true;
            warn!(
                max_pages = options.max_pages,
                "Page limit reached, source has more data"
            );
        }
        let has_more = scanned.has_more() && !limit_reached;

        info!(page, scanned = scanned.items.len(), written, has_more, "Page written");
        *state = transition(*state, PipelineEvent::PageWritten { has_more })?;
        start = scanned.continuation;
    }

    if options.verify {
        let rows = sink.query_all().await.map_err(PipelineError::Verify)?;
        report.verified_rows = Some(rows.len());
        info!(rows = rows.len(), "Verification complete");
    }

    Ok(())
}
