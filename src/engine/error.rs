use thiserror::Error;

use super::square::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no game in progress")]
    NoGameInProgress,
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("invalid square: {input:?}")]
    InvalidSquare { input: String },
    #[error("unsupported difficulty tier: {tier}")]
    UnsupportedDifficulty { tier: u8 },
}
