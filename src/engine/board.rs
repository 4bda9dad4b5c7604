use std::collections::BTreeMap;

use super::piece::{Piece, PieceColor};
use super::square::Square;

/// Read-only view of the engine's board after the latest half-move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pieces: BTreeMap<Square, Piece>,
}

impl BoardSnapshot {
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        Self {
            pieces: pieces.into_iter().collect(),
        }
    }

    /// Parses the piece-placement field of a FEN string, e.g. the default starting position
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_placement(placement: &str) -> Option<Self> {
        let mut pieces = BTreeMap::new();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    if file > 8 {
                        return None;
                    }
                    continue;
                }
                if file >= 8 {
                    return None;
                }
                pieces.insert(Square::from_rank_file(rank, file), Piece::from_fen(c)?);
                file += 1;
            }
            if file != 8 {
                return None;
            }
        }
        Some(Self { pieces })
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    pub fn is_occupied_by(&self, square: Square, color: PieceColor) -> bool {
        self.get(square).map_or(false, |piece| piece.color == color)
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces.iter().map(|(square, piece)| (*square, *piece))
    }

    pub fn to_ascii(&self) -> String {
        let mut board_str = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = self
                    .get(Square::from_rank_file(rank, file))
                    .map_or('.', |piece| piece.to_fen());
                board_str.push(c);
            }
            board_str.push('\n');
        }
        board_str
    }
}
