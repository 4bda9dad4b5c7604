use std::fmt;
use std::str::FromStr;

use super::error::EngineError;

/// A board square, indexed `rank * 8 + file` so that a1 is 0 and h8 is 63.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(u8);

impl Square {
    pub fn from_rank_file(rank: u8, file: u8) -> Self {
        debug_assert!(rank < 8 && file < 8, "rank and file must be in 0..8");
        Square(rank * 8 + file)
    }

    pub fn from_index(index: u8) -> Option<Self> {
        (index < 64).then_some(Square(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Parses squares like `e4`. Upper-case files (`E4`) are accepted too.
    pub fn from_algebraic(algebraic: &str) -> Option<Self> {
        let mut chars = algebraic.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self::from_rank_file(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }

    /// Returns the square shifted by the given rank and file deltas, if it stays on the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Self::from_rank_file(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(input.trim()).ok_or_else(|| EngineError::InvalidSquare {
            input: input.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_conversion() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.to_algebraic(), "e4");
        assert_eq!(Square::from_algebraic("E4"), Some(e4));
    }

    #[test]
    fn test_corner_indices() {
        assert_eq!(Square::from_algebraic("a1").unwrap().index(), 0);
        assert_eq!(Square::from_algebraic("h8").unwrap().index(), 63);
    }

    #[test]
    fn test_rejects_off_board_input() {
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
        assert!("z0".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = Square::from_rank_file(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 1), Square::from_algebraic("b2"));
    }
}
