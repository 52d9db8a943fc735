//! Fetch lifecycle for a report view
//!
//! Models one report view's request cycle as an explicit state machine:
//! `Idle -> Loading -> Loaded | Failed`. Every fetch gets a ticket with a
//! monotonically increasing sequence number; only the response belonging
//! to the most recently issued ticket may change the view, so a slow old
//! response can never overwrite a newer one.
//!
//! The controller owns a single [`ReportSnapshot`] value that is replaced
//! wholesale on every transition. Export activity is tracked as a separate
//! flag on the snapshot, independent of the fetch phase, so finishing one
//! operation can never clear the other's busy indicator.

use crate::error::FetchError;
use crate::stats;
use crate::types::{DateRange, ReportPayload, UsageStatistics};
use log::debug;

/// Where the report view stands in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing has been requested yet.
    Idle,
    /// A request is in flight; previously loaded data stays visible.
    Loading,
    /// The latest request completed and its payload is current.
    Loaded,
    /// The latest request failed; the previous payload, if any, is kept.
    Failed,
}

/// Permission to perform one fetch, issued by [`ReportController::start`].
///
/// Carries the sequence number that decides, at resolution time, whether
/// the response is still the latest and may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub component_id: i64,
    pub range: DateRange,
}

/// What [`ReportController::resolve`] did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response belonged to the latest ticket and was applied.
    Applied,
    /// A newer fetch started in the meantime; the response was dropped.
    Discarded,
}

/// Everything a renderer needs to draw the report view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSnapshot {
    pub phase: FetchPhase,
    pub component_id: Option<i64>,
    pub range: Option<DateRange>,
    /// Last successfully loaded payload. Survives failed refreshes.
    pub payload: Option<ReportPayload>,
    /// Statistics derived from `payload`, absent when the payload carries
    /// no usage history.
    pub statistics: Option<UsageStatistics>,
    /// Human-readable description of the latest failure.
    pub error: Option<String>,
    /// An export is currently running. Independent of `phase`.
    pub exporting: bool,
}

impl ReportSnapshot {
    fn initial() -> Self {
        ReportSnapshot {
            phase: FetchPhase::Idle,
            component_id: None,
            range: None,
            payload: None,
            statistics: None,
            error: None,
            exporting: false,
        }
    }
}

/// State machine owning one report view's fetch and export cycle.
#[derive(Debug, Clone)]
pub struct ReportController {
    next_seq: u64,
    latest_seq: Option<u64>,
    snapshot: ReportSnapshot,
}

impl ReportController {
    pub fn new() -> Self {
        ReportController { next_seq: 0, latest_seq: None, snapshot: ReportSnapshot::initial() }
    }

    /// Current view state.
    pub fn snapshot(&self) -> &ReportSnapshot {
        &self.snapshot
    }

    /// Begin a fetch for `component_id` over `range`.
    ///
    /// A report view can exist before any part is selected; without an id
    /// there is nothing to request, so this returns `None` and leaves the
    /// state untouched. Otherwise the view moves to `Loading`, any stale
    /// error is cleared, previously loaded data stays visible, and the
    /// returned ticket supersedes all earlier ones.
    pub fn start(&mut self, component_id: Option<i64>, range: DateRange) -> Option<FetchTicket> {
        let component_id = component_id?;

        self.next_seq += 1;
        self.latest_seq = Some(self.next_seq);
        debug!("fetch #{} started for component {} ({} to {})", self.next_seq, component_id, range.start_date, range.end_date);

        self.snapshot = ReportSnapshot {
            phase: FetchPhase::Loading,
            component_id: Some(component_id),
            range: Some(range),
            error: None,
            ..self.snapshot.clone()
        };

        Some(FetchTicket { seq: self.next_seq, component_id, range })
    }

    /// Apply the result of a fetch, unless its ticket has been superseded.
    ///
    /// Success replaces the payload and recomputes the statistics for the
    /// ticket's range. Failure keeps the previous payload and statistics
    /// and records the error text. Stale responses are discarded without
    /// touching the view.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<ReportPayload, FetchError>) -> Outcome {
        if Some(ticket.seq) != self.latest_seq {
            debug!("discarding stale fetch #{} (latest is #{:?})", ticket.seq, self.latest_seq);
            return Outcome::Discarded;
        }

        match result {
            Ok(payload) => {
                let statistics = stats::compute_statistics(Some(&payload), &ticket.range);
                self.snapshot = ReportSnapshot {
                    phase: FetchPhase::Loaded,
                    payload: Some(payload),
                    statistics,
                    error: None,
                    ..self.snapshot.clone()
                };
            }
            Err(err) => {
                debug!("fetch #{} failed: {}", ticket.seq, err);
                self.snapshot = ReportSnapshot {
                    phase: FetchPhase::Failed,
                    error: Some(err.to_string()),
                    ..self.snapshot.clone()
                };
            }
        }
        Outcome::Applied
    }

    /// Mark the start of an export. Returns false when one is already
    /// running, so callers do not start a second concurrent export.
    pub fn begin_export(&mut self) -> bool {
        if self.snapshot.exporting {
            return false;
        }
        self.snapshot = ReportSnapshot { exporting: true, ..self.snapshot.clone() };
        true
    }

    /// Mark the end of an export, successful or not.
    pub fn finish_export(&mut self) {
        self.snapshot = ReportSnapshot { exporting: false, ..self.snapshot.clone() };
    }
}

impl Default for ReportController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
