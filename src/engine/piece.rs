use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(&self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_str = match self {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        };
        write!(f, "{}", color_str)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn material_value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    pub fn to_fen(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }

    pub fn from_fen(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { kind, color })
    }

    pub fn to_unicode_piece_char(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, PieceColor::White) => '♔',
            (PieceKind::Queen, PieceColor::White) => '♕',
            (PieceKind::Rook, PieceColor::White) => '♖',
            (PieceKind::Bishop, PieceColor::White) => '♗',
            (PieceKind::Knight, PieceColor::White) => '♘',
            (PieceKind::Pawn, PieceColor::White) => '♙',
            (PieceKind::King, PieceColor::Black) => '♚',
            (PieceKind::Queen, PieceColor::Black) => '♛',
            (PieceKind::Rook, PieceColor::Black) => '♜',
            (PieceKind::Bishop, PieceColor::Black) => '♝',
            (PieceKind::Knight, PieceColor::Black) => '♞',
            (PieceKind::Pawn, PieceColor::Black) => '♟',
        }
    }
}
