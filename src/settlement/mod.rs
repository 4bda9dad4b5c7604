//! The settlement seam: where a finished match's outcome is recorded.

use std::fmt;

use crate::game::{EndReason, GameResult, Mode, Outcome, Ticket};

pub mod error;
pub mod file_ledger;
pub mod worker;

pub use error::SettlementError;
pub use file_ledger::FileLedger;
pub use worker::SettlementWorker;

/// What gets recorded for one finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRecord {
    pub result: GameResult,
    pub reason: EndReason,
    pub mode: Mode,
    pub time_control: &'static str,
}

impl SettlementRecord {
    pub fn new(outcome: Outcome, mode: Mode) -> Self {
        Self {
            result: outcome.result,
            reason: outcome.reason,
            mode,
            time_control: mode.time_control(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub games_played: u32,
    pub games_won: u32,
    pub games_drawn: u32,
}

impl fmt::Display for LedgerTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "played {}, won {}, drawn {}",
            self.games_played, self.games_won, self.games_drawn
        )
    }
}

/// Acknowledgement of a recorded result, with the player's totals if the ledger reports them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    pub totals: Option<LedgerTotals>,
}

impl Receipt {
    pub fn acknowledged() -> Self {
        Self::default()
    }

    pub fn with_totals(totals: LedgerTotals) -> Self {
        Self {
            totals: Some(totals),
        }
    }
}

pub trait Settlement {
    fn submit_result(&mut self, record: &SettlementRecord) -> Result<Receipt, SettlementError>;
}

impl<S: Settlement + ?Sized> Settlement for Box<S> {
    fn submit_result(&mut self, record: &SettlementRecord) -> Result<Receipt, SettlementError> {
        (**self).submit_result(record)
    }
}

/// A record waiting to be submitted, tagged with the finalizer's ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRequest {
    pub ticket: Ticket,
    pub record: SettlementRecord,
}

#[derive(Debug)]
pub struct SettlementCompletion {
    pub ticket: Ticket,
    pub result: Result<Receipt, SettlementError>,
}
