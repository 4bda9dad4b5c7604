//! User actions accepted by the match controller

use crate::engine::Square;

use super::mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Select a piece, pick its destination, or clear the selection.
    ClickSquare(Square),
    Resign,
    /// The built-in opponent accepts every draw offer.
    OfferDraw,
    /// Start a match from idle. During a match this abandons it as a resignation.
    NewGame,
    /// Only honoured while idle.
    SelectMode(Mode),
}
