use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("ledger entry could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("rejected: {reason}")]
    Rejected { reason: String },
    #[error("settlement worker is not running")]
    WorkerUnavailable,
}
