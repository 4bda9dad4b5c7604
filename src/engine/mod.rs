//! The move-engine seam. The match controller only ever talks to a [`MoveEngine`]; rules,
//! legality and opponent strength live behind it.

use std::collections::BTreeSet;
use std::fmt;

pub mod board;
pub mod error;
pub mod move_picker;
pub mod piece;
pub mod shakmaty_engine;
pub mod square;

pub use board::BoardSnapshot;
pub use error::EngineError;
pub use piece::{Piece, PieceColor, PieceKind};
pub use shakmaty_engine::ShakmatyEngine;
pub use square::Square;

/// A move as the user enters it: the square a piece leaves and the square it lands on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EngineMove {
    pub from: Square,
    pub to: Square,
}

impl EngineMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for EngineMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Why a finished game is drawn, when the engine can tell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawKind {
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

/// Result of the engine's terminal-state query for the current position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TerminalState {
    pub finished: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    /// Only meaningful when `finished` is set and neither `checkmate` nor `stalemate` is.
    pub draw: Option<DrawKind>,
}

impl TerminalState {
    pub fn in_progress() -> Self {
        Self::default()
    }

    pub fn checkmate() -> Self {
        Self {
            finished: true,
            checkmate: true,
            ..Self::default()
        }
    }

    pub fn stalemate() -> Self {
        Self {
            finished: true,
            stalemate: true,
            ..Self::default()
        }
    }

    pub fn drawn(kind: Option<DrawKind>) -> Self {
        Self {
            finished: true,
            draw: kind,
            ..Self::default()
        }
    }
}

pub trait MoveEngine {
    /// Starts a fresh game from the standard starting position.
    fn new_game(&mut self) -> BoardSnapshot;

    /// Legal destinations for the piece on `from`, for the side to move.
    fn legal_moves(&self, from: Square) -> BTreeSet<Square>;

    fn apply_move(&mut self, from: Square, to: Square) -> Result<BoardSnapshot, EngineError>;

    /// Picks (but does not apply) a move for the side to move at the given difficulty tier.
    fn choose_move(&mut self, difficulty: u8) -> Result<EngineMove, EngineError>;

    fn terminal_state(&self) -> TerminalState;
}
