//! [`MoveEngine`] backed by the `shakmaty` rules crate.
//!
//! The player enters castling as the king's two-square move and every promotion becomes a
//! queen. Threefold repetition and the fifty-move rule end the game automatically.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::fen::Fen;
use shakmaty::{Chess, Color, EnPassantMode, File, Move, Position, Rank, Role};

use super::move_picker;
use super::{
    BoardSnapshot, DrawKind, EngineError, EngineMove, MoveEngine, Piece, PieceColor, PieceKind,
    Square, TerminalState,
};

const FIFTY_MOVE_HALFMOVES: u32 = 100;
const REPETITION_LIMIT: u8 = 3;

pub struct ShakmatyEngine {
    position: Option<Chess>,
    repetitions: HashMap<String, u8>,
    rng: StdRng,
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose opponent choices are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            position: None,
            repetitions: HashMap::new(),
            rng,
        }
    }

    fn snapshot(position: &Chess) -> BoardSnapshot {
        let board = position.board();
        BoardSnapshot::from_pieces(Square::all().filter_map(|square| {
            board
                .piece_at(to_shakmaty(square))
                .map(|piece| (square, from_shakmaty_piece(piece)))
        }))
    }

    fn find_move(position: &Chess, from: Square, to: Square) -> Option<Move> {
        let squares = (to_shakmaty(from), to_shakmaty(to));
        let mut under_promotion = None;
        for candidate in position.legal_moves() {
            if entered_squares(&candidate) != Some(squares) {
                continue;
            }
            match candidate.promotion() {
                None | Some(Role::Queen) => return Some(candidate),
                Some(_) => {
                    under_promotion.get_or_insert(candidate);
                }
            }
        }
        under_promotion
    }

    fn record_position(&mut self) {
        if let Some(position) = &self.position {
            *self
                .repetitions
                .entry(repetition_key(position))
                .or_insert(0) += 1;
        }
    }
}

impl MoveEngine for ShakmatyEngine {
    fn new_game(&mut self) -> BoardSnapshot {
        let position = Chess::default();
        let snapshot = Self::snapshot(&position);
        self.position = Some(position);
        self.repetitions.clear();
        self.record_position();
        snapshot
    }

    fn legal_moves(&self, from: Square) -> BTreeSet<Square> {
        let position = match &self.position {
            Some(position) => position,
            None => return BTreeSet::new(),
        };
        let from = to_shakmaty(from);
        position
            .legal_moves()
            .iter()
            .filter_map(entered_squares)
            .filter(|(move_from, _)| *move_from == from)
            .map(|(_, move_to)| from_shakmaty(move_to))
            .collect()
    }

    fn apply_move(&mut self, from: Square, to: Square) -> Result<BoardSnapshot, EngineError> {
        let position = self
            .position
            .as_ref()
            .ok_or(EngineError::NoGameInProgress)?;
        let chess_move =
            Self::find_move(position, from, to).ok_or(EngineError::IllegalMove { from, to })?;
        let next = position
            .clone()
            .play(chess_move)
            .map_err(|_| EngineError::IllegalMove { from, to })?;

        let snapshot = Self::snapshot(&next);
        self.position = Some(next);
        self.record_position();
        Ok(snapshot)
    }

    fn choose_move(&mut self, difficulty: u8) -> Result<EngineMove, EngineError> {
        let position = self
            .position
            .as_ref()
            .ok_or(EngineError::NoGameInProgress)?;
        let chosen = match difficulty {
            1 => move_picker::pick_random(position, &mut self.rng),
            2 => move_picker::pick_material_greedy(position, &mut self.rng),
            3 => move_picker::pick_two_ply(position, &mut self.rng),
            tier => return Err(EngineError::UnsupportedDifficulty { tier }),
        };
        let (from, to) = chosen
            .as_ref()
            .and_then(entered_squares)
            .ok_or(EngineError::NoAvailableMoves)?;

        let engine_move = EngineMove::new(from_shakmaty(from), from_shakmaty(to));
        debug!("difficulty {} picked {}", difficulty, engine_move);
        Ok(engine_move)
    }

    fn terminal_state(&self) -> TerminalState {
        let position = match &self.position {
            Some(position) => position,
            None => return TerminalState::in_progress(),
        };

        if position.is_checkmate() {
            return TerminalState::checkmate();
        }
        if position.is_stalemate() {
            return TerminalState::stalemate();
        }
        if position.is_insufficient_material() {
            return TerminalState::drawn(Some(DrawKind::InsufficientMaterial));
        }
        let seen = self
            .repetitions
            .get(&repetition_key(position))
            .copied()
            .unwrap_or(0);
        if seen >= REPETITION_LIMIT {
            return TerminalState::drawn(Some(DrawKind::ThreefoldRepetition));
        }
        if position.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            return TerminalState::drawn(Some(DrawKind::FiftyMoveRule));
        }
        TerminalState::in_progress()
    }
}

/// The from/to pair a player types for `chess_move`. Castling is the king's two-square move.
fn entered_squares(chess_move: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match chess_move {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let king_file = if rook.file() == File::H {
                File::G
            } else {
                File::C
            };
            Some((*king, shakmaty::Square::from_coords(king_file, king.rank())))
        }
        Move::Put { .. } => None,
    }
}

/// Board, side to move, castling rights and en passant square: the parts of a FEN that
/// decide whether two positions repeat.
fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.file())),
        Rank::new(u32::from(square.rank())),
    )
}

fn from_shakmaty(square: shakmaty::Square) -> Square {
    Square::from_rank_file(square.rank() as u8, square.file() as u8)
}

pub(crate) fn role_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn from_shakmaty_piece(piece: shakmaty::Piece) -> Piece {
    let color = match piece.color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    };
    Piece::new(role_kind(piece.role), color)
}
