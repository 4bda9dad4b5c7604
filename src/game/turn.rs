use std::collections::BTreeSet;

use crate::engine::Square;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnState {
    AwaitingPlayerSelection,
    AwaitingPlayerTarget,
    OpponentThinking,
    Ended,
}

impl TurnState {
    pub fn accepts_clicks(&self) -> bool {
        matches!(
            self,
            TurnState::AwaitingPlayerSelection | TurnState::AwaitingPlayerTarget
        )
    }
}

/// The square the player picked up a piece from and where that piece may go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub destinations: BTreeSet<Square>,
}

impl Selection {
    pub fn new(square: Square, destinations: BTreeSet<Square>) -> Self {
        Self {
            square,
            destinations,
        }
    }

    pub fn allows(&self, target: Square) -> bool {
        self.destinations.contains(&target)
    }
}
