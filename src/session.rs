//! Holds the latest planning result for a presentation layer.
//!
//! Runs are never cancelled. Each run takes a ticket when it starts, and only the
//! most recently issued ticket may publish; results of superseded runs are
//! dropped when they arrive.

use tracing::debug;

use crate::planner::PlanningResult;

/// Identifies one planning run within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    Accepted,
    /// A newer run started after this one; its result was discarded.
    Superseded,
}

#[derive(Debug, Default)]
pub struct PlanningSession {
    issued: u64,
    latest: Option<PlanningResult>,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run, superseding any run still in flight.
    pub fn begin(&mut self) -> RunTicket {
        self.issued += 1;
        RunTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RunTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Stores `result` if `ticket` belongs to the most recent run.
    pub fn publish(&mut self, ticket: RunTicket, result: PlanningResult) -> Publication {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale planning result");
            return Publication::Superseded;
        }
        self.latest = Some(result);
        Publication::Accepted
    }

    pub fn latest(&self) -> Option<&PlanningResult> {
        self.latest.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}
