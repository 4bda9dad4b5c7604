use std::fmt;

/// Result from the player's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Code used by the ledger contract.
    pub fn code(&self) -> u8 {
        match self {
            GameResult::Win => 1,
            GameResult::Loss => 2,
            GameResult::Draw => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(GameResult::Win),
            2 => Some(GameResult::Loss),
            3 => Some(GameResult::Draw),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result_str = match self {
            GameResult::Win => "win",
            GameResult::Loss => "loss",
            GameResult::Draw => "draw",
        };
        write!(f, "{}", result_str)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EndReason {
    Checkmate,
    Resignation,
    Timeout,
    DrawAgreement,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl EndReason {
    /// Code used by the ledger contract.
    pub fn code(&self) -> u8 {
        match self {
            EndReason::Checkmate => 1,
            EndReason::Resignation => 2,
            EndReason::Timeout => 3,
            EndReason::DrawAgreement => 4,
            EndReason::Stalemate => 5,
            EndReason::InsufficientMaterial => 6,
            EndReason::ThreefoldRepetition => 7,
            EndReason::FiftyMoveRule => 8,
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason_str = match self {
            EndReason::Checkmate => "checkmate",
            EndReason::Resignation => "resignation",
            EndReason::Timeout => "timeout",
            EndReason::DrawAgreement => "draw agreement",
            EndReason::Stalemate => "stalemate",
            EndReason::InsufficientMaterial => "insufficient material",
            EndReason::ThreefoldRepetition => "threefold repetition",
            EndReason::FiftyMoveRule => "fifty-move rule",
        };
        write!(f, "{}", reason_str)
    }
}

/// How a session ended. Produced once per session and handed once to the finalizer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub result: GameResult,
    pub reason: EndReason,
}

impl Outcome {
    pub fn new(result: GameResult, reason: EndReason) -> Self {
        Self { result, reason }
    }

    /// Short line shown on the overlay while the result is being recorded.
    pub fn summary(&self) -> &'static str {
        match self.result {
            GameResult::Win => "You won!",
            GameResult::Loss => "You lost!",
            GameResult::Draw => "Game ended in a draw!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.result, self.reason)
    }
}
