//! Opponent move choice for the three difficulty tiers.
//!
//! * tier 1: any legal move, uniformly at random
//! * tier 2: the move with the best material balance after one ply
//! * tier 3: the move whose worst-case material balance after the best reply is highest
//!
//! Ties are broken at random and an immediate checkmate always wins the comparison.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shakmaty::{Chess, Color, File, Move, Position, Rank, Role, Square};

use super::shakmaty_engine::role_kind;

const MATE_SCORE: i32 = 100_000;

pub fn pick_random(position: &Chess, rng: &mut StdRng) -> Option<Move> {
    playable_moves(position).choose(rng).cloned()
}

pub fn pick_material_greedy(position: &Chess, rng: &mut StdRng) -> Option<Move> {
    let me = position.turn();
    pick_best(position, rng, |after| {
        if after.is_checkmate() {
            MATE_SCORE
        } else {
            material_balance(after, me)
        }
    })
}

pub fn pick_two_ply(position: &Chess, rng: &mut StdRng) -> Option<Move> {
    let me = position.turn();
    pick_best(position, rng, |after| {
        if after.is_checkmate() {
            return MATE_SCORE;
        }
        if after.is_stalemate() {
            return 0;
        }
        playable_moves(after)
            .into_iter()
            .filter_map(|reply| after.clone().play(reply).ok())
            .map(|reply_position| {
                if reply_position.is_checkmate() {
                    -MATE_SCORE
                } else {
                    material_balance(&reply_position, me)
                }
            })
            .min()
            .unwrap_or(0)
    })
}

/// Material of `color` minus material of the other side, in centipawns.
pub fn material_balance(position: &Chess, color: Color) -> i32 {
    let board = position.board();
    let mut total = 0;
    for rank in 0..8u32 {
        for file in 0..8u32 {
            let square = Square::from_coords(File::new(file), Rank::new(rank));
            if let Some(piece) = board.piece_at(square) {
                let value = role_kind(piece.role).material_value();
                if piece.color == color {
                    total += value;
                } else {
                    total -= value;
                }
            }
        }
    }
    total
}

/// Legal moves a player could enter as a from/to pair. Under-promotions are left out because
/// promotions are always entered as queen promotions.
pub(crate) fn playable_moves(position: &Chess) -> Vec<Move> {
    position
        .legal_moves()
        .into_iter()
        .filter(|m| !matches!(m, Move::Put { .. }))
        .filter(|m| matches!(m.promotion(), None | Some(Role::Queen)))
        .collect()
}

fn pick_best<F>(position: &Chess, rng: &mut StdRng, score: F) -> Option<Move>
where
    F: Fn(&Chess) -> i32,
{
    let mut best_score = i32::MIN;
    let mut best_moves: Vec<Move> = Vec::new();

    for candidate in playable_moves(position) {
        let after = match position.clone().play(candidate.clone()) {
            Ok(after) => after,
            Err(_) => continue,
        };
        let candidate_score = score(&after);
        if candidate_score > best_score {
            best_score = candidate_score;
            best_moves.clear();
            best_moves.push(candidate);
        } else if candidate_score == best_score {
            best_moves.push(candidate);
        }
    }

    best_moves.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn play_line(line: &[(&str, &str)]) -> Chess {
        let mut position = Chess::default();
        for (from, to) in line {
            let from: Square = from.parse().unwrap();
            let to: Square = to.parse().unwrap();
            let chess_move = playable_moves(&position)
                .into_iter()
                .find(|m| m.from() == Some(from) && m.to() == to)
                .unwrap();
            position = position.play(chess_move).unwrap();
        }
        position
    }

    #[test]
    fn test_starting_material_is_balanced() {
        let position = Chess::default();
        assert_eq!(material_balance(&position, Color::White), 0);
        assert_eq!(material_balance(&position, Color::Black), 0);
    }

    #[test]
    fn test_greedy_takes_free_pawn() {
        // 1. e4 d5: exd5 is the only capture
        let position = play_line(&[("e2", "e4"), ("d7", "d5")]);
        let mut rng = StdRng::seed_from_u64(7);
        let chosen = pick_material_greedy(&position, &mut rng).unwrap();
        assert_eq!(chosen.from(), Some(Square::E4));
        assert_eq!(chosen.to(), Square::D5);
    }

    #[test]
    fn test_stronger_tiers_find_mate_in_one() {
        let position = play_line(&[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
        ]);
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let greedy = pick_material_greedy(&position, &mut rng).unwrap();
            assert_eq!(greedy.to(), Square::F7);
            let two_ply = pick_two_ply(&position, &mut rng).unwrap();
            assert_eq!(two_ply.to(), Square::F7);
        }
    }

    #[test]
    fn test_random_pick_is_legal() {
        let position = Chess::default();
        let mut rng = StdRng::seed_from_u64(42);
        let chosen = pick_random(&position, &mut rng).unwrap();
        assert!(position.legal_moves().contains(&chosen));
    }
}
