//! Maps whatever just happened in the match to at most one outcome.

use crate::engine::{DrawKind, TerminalState};

use super::notification::Severity;
use super::outcome::{EndReason, GameResult, Outcome};
use super::side::Side;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger {
    /// `mover` just completed a half-move.
    HalfMove { mover: Side },
    /// `expired`'s clock reached zero.
    Timeout { expired: Side },
    Resignation,
    DrawAccepted,
}

/// Returns the outcome for `trigger`, or `None` when the game goes on.
///
/// Calling it again with the same inputs gives the same answer; only the first outcome of a
/// session is ever acted on.
pub fn detect(trigger: Trigger, terminal: &TerminalState) -> Option<Outcome> {
    match trigger {
        Trigger::Timeout { expired } => Some(Outcome::new(
            result_for(expired.opposite()),
            EndReason::Timeout,
        )),
        Trigger::HalfMove { mover } => {
            if !terminal.finished {
                return None;
            }
            if terminal.checkmate {
                return Some(Outcome::new(result_for(mover), EndReason::Checkmate));
            }
            if terminal.stalemate {
                return Some(Outcome::new(GameResult::Draw, EndReason::Stalemate));
            }
            let reason = match terminal.draw {
                Some(DrawKind::InsufficientMaterial) => EndReason::InsufficientMaterial,
                Some(DrawKind::ThreefoldRepetition) => EndReason::ThreefoldRepetition,
                Some(DrawKind::FiftyMoveRule) => EndReason::FiftyMoveRule,
                None => EndReason::DrawAgreement,
            };
            Some(Outcome::new(GameResult::Draw, reason))
        }
        Trigger::Resignation => Some(Outcome::new(GameResult::Loss, EndReason::Resignation)),
        Trigger::DrawAccepted => Some(Outcome::new(GameResult::Draw, EndReason::DrawAgreement)),
    }
}

/// Result from the player's point of view when `winner` wins.
fn result_for(winner: Side) -> GameResult {
    match winner {
        Side::Player => GameResult::Win,
        Side::Opponent => GameResult::Loss,
    }
}

/// Notification shown the moment a match ends.
pub fn announcement(trigger: Trigger, outcome: &Outcome) -> (String, Severity) {
    if trigger == Trigger::DrawAccepted {
        return ("Draw offer accepted!".to_string(), Severity::Info);
    }
    let (message, severity) = match (outcome.result, outcome.reason) {
        (GameResult::Win, EndReason::Checkmate) => {
            ("Checkmate! You won the game!", Severity::Success)
        }
        (_, EndReason::Checkmate) => ("Checkmate! AI won the game.", Severity::Error),
        (GameResult::Win, EndReason::Timeout) => {
            ("AI ran out of time! You win!", Severity::Success)
        }
        (_, EndReason::Timeout) => ("Time's up! You lost the game.", Severity::Error),
        (_, EndReason::Resignation) => ("You resigned the game.", Severity::Info),
        (_, EndReason::Stalemate) => ("Stalemate! The game is a draw.", Severity::Info),
        (_, EndReason::InsufficientMaterial) => ("Draw! Insufficient material.", Severity::Info),
        (_, EndReason::ThreefoldRepetition) => ("Draw! Threefold repetition.", Severity::Info),
        (_, EndReason::FiftyMoveRule) => ("Draw! Fifty-move rule.", Severity::Info),
        (_, EndReason::DrawAgreement) => ("Draw! The game ended in a draw.", Severity::Info),
    };
    (message.to_string(), severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_charged_to_expired_side() {
        let still_playing = TerminalState::in_progress();
        assert_eq!(
            detect(Trigger::Timeout { expired: Side::Player }, &still_playing),
            Some(Outcome::new(GameResult::Loss, EndReason::Timeout))
        );
        assert_eq!(
            detect(Trigger::Timeout { expired: Side::Opponent }, &still_playing),
            Some(Outcome::new(GameResult::Win, EndReason::Timeout))
        );
    }

    #[test]
    fn test_timeout_wins_over_board_state() {
        assert_eq!(
            detect(
                Trigger::Timeout { expired: Side::Player },
                &TerminalState::checkmate()
            ),
            Some(Outcome::new(GameResult::Loss, EndReason::Timeout))
        );
    }

    #[test]
    fn test_checkmate_goes_to_mover() {
        let mate = TerminalState::checkmate();
        assert_eq!(
            detect(Trigger::HalfMove { mover: Side::Player }, &mate),
            Some(Outcome::new(GameResult::Win, EndReason::Checkmate))
        );
        assert_eq!(
            detect(Trigger::HalfMove { mover: Side::Opponent }, &mate),
            Some(Outcome::new(GameResult::Loss, EndReason::Checkmate))
        );
    }

    #[test]
    fn test_unfinished_position_has_no_outcome() {
        assert_eq!(
            detect(
                Trigger::HalfMove { mover: Side::Player },
                &TerminalState::in_progress()
            ),
            None
        );
    }

    #[test]
    fn test_draw_kinds_map_to_reasons() {
        let cases = [
            (TerminalState::stalemate(), EndReason::Stalemate),
            (
                TerminalState::drawn(Some(DrawKind::InsufficientMaterial)),
                EndReason::InsufficientMaterial,
            ),
            (
                TerminalState::drawn(Some(DrawKind::ThreefoldRepetition)),
                EndReason::ThreefoldRepetition,
            ),
            (
                TerminalState::drawn(Some(DrawKind::FiftyMoveRule)),
                EndReason::FiftyMoveRule,
            ),
            (TerminalState::drawn(None), EndReason::DrawAgreement),
        ];
        for (terminal, reason) in cases {
            assert_eq!(
                detect(Trigger::HalfMove { mover: Side::Opponent }, &terminal),
                Some(Outcome::new(GameResult::Draw, reason))
            );
        }
    }

    #[test]
    fn test_synthesized_outcomes() {
        let any = TerminalState::in_progress();
        assert_eq!(
            detect(Trigger::Resignation, &any),
            Some(Outcome::new(GameResult::Loss, EndReason::Resignation))
        );
        assert_eq!(
            detect(Trigger::DrawAccepted, &any),
            Some(Outcome::new(GameResult::Draw, EndReason::DrawAgreement))
        );
    }

    #[test]
    fn test_announcements() {
        let accepted = Outcome::new(GameResult::Draw, EndReason::DrawAgreement);
        assert_eq!(
            announcement(Trigger::DrawAccepted, &accepted).0,
            "Draw offer accepted!"
        );
        assert_eq!(
            announcement(Trigger::HalfMove { mover: Side::Player }, &accepted).0,
            "Draw! The game ended in a draw."
        );
        let lost_on_time = Outcome::new(GameResult::Loss, EndReason::Timeout);
        assert_eq!(
            announcement(Trigger::Timeout { expired: Side::Player }, &lost_on_time),
            ("Time's up! You lost the game.".to_string(), Severity::Error)
        );
    }
}
