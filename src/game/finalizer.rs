use log::debug;

use crate::settlement::{SettlementRecord, SettlementRequest};

use super::mode::Mode;
use super::outcome::Outcome;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FinalizerState {
    Idle,
    OverlayShown,
    Submitting,
    Resetting,
}

/// Identifies one settlement submission. Completions carry it back so an answer for an
/// earlier session can't reset a later one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Ticket(u64);

#[cfg(test)]
impl Ticket {
    pub(crate) fn for_test(id: u64) -> Self {
        Ticket(id)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Completion {
    /// Answers the submission in flight; the session should now reset.
    Current,
    /// Arrived after the reset it belonged to; only worth a notification.
    Stale,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Overlay {
    pub summary: &'static str,
    pub detail: &'static str,
}

const OVERLAY_DETAIL: &str = "Processing game result...";

/// One-shot handoff of an outcome to settlement:
/// `Idle -> OverlayShown -> Submitting -> Resetting -> Idle`.
#[derive(Debug)]
pub struct Finalizer {
    state: FinalizerState,
    outcome: Option<Outcome>,
    ticket: Option<Ticket>,
    next_ticket: u64,
}

impl Default for Finalizer {
    fn default() -> Self {
        Self {
            state: FinalizerState::Idle,
            outcome: None,
            ticket: None,
            next_ticket: 1,
        }
    }
}

impl Finalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FinalizerState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_idle(&self) -> bool {
        self.state == FinalizerState::Idle
    }

    /// Takes ownership of the session's outcome and shows the overlay. Returns false, and
    /// ignores the outcome, if a previous one is still being finalized.
    pub fn begin(&mut self, outcome: Outcome) -> bool {
        if self.state != FinalizerState::Idle {
            debug!("finalizer busy ({:?}), discarding {}", self.state, outcome);
            return false;
        }
        self.state = FinalizerState::OverlayShown;
        self.outcome = Some(outcome);
        true
    }

    /// Builds the one settlement request for this outcome. Any later call returns `None`.
    pub fn submit(&mut self, mode: Mode) -> Option<SettlementRequest> {
        if self.state != FinalizerState::OverlayShown {
            return None;
        }
        let outcome = self.outcome?;
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.ticket = Some(ticket);
        self.state = FinalizerState::Submitting;
        Some(SettlementRequest {
            ticket,
            record: SettlementRecord::new(outcome, mode),
        })
    }

    /// Settlement answered, or its deadline passed, for `ticket`.
    pub fn settle(&mut self, ticket: Ticket) -> Completion {
        if self.state == FinalizerState::Submitting && self.ticket == Some(ticket) {
            self.state = FinalizerState::Resetting;
            Completion::Current
        } else {
            Completion::Stale
        }
    }

    /// Back to idle once the session has been torn down.
    pub fn finish(&mut self) {
        self.state = FinalizerState::Idle;
        self.outcome = None;
        self.ticket = None;
    }

    pub fn overlay(&self) -> Option<Overlay> {
        match self.state {
            FinalizerState::Idle => None,
            _ => self.outcome.map(|outcome| Overlay {
                summary: outcome.summary(),
                detail: OVERLAY_DETAIL,
            }),
        }
    }
}
