use std::fmt;

use crate::engine::PieceColor;

/// One of the two participants in a match. The player always has the white pieces.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn color(&self) -> PieceColor {
        match self {
            Side::Player => PieceColor::White,
            Side::Opponent => PieceColor::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        };
        write!(f, "{}", side_str)
    }
}
