use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Difficulty tier of the built-in opponent. Fixed for the whole session and also decides the
/// clock allotment of both sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mode {input:?}, expected beginner, intermediate or advanced")]
pub struct ParseModeError {
    input: String,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Beginner, Mode::Intermediate, Mode::Advanced];

    /// Tier passed to the move engine's `choose_move`.
    pub fn difficulty(&self) -> u8 {
        match self {
            Mode::Beginner => 1,
            Mode::Intermediate => 2,
            Mode::Advanced => 3,
        }
    }

    pub fn initial_seconds(&self) -> u32 {
        match self {
            Mode::Beginner => 600,
            Mode::Intermediate => 300,
            Mode::Advanced => 180,
        }
    }

    /// Time-control label recorded with every result, e.g. `5+0`.
    pub fn time_control(&self) -> &'static str {
        match self {
            Mode::Beginner => "10+0",
            Mode::Intermediate => "5+0",
            Mode::Advanced => "3+0",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode_str = match self {
            Mode::Beginner => "Beginner",
            Mode::Intermediate => "Intermediate",
            Mode::Advanced => "Advanced",
        };
        write!(f, "{}", mode_str)
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "1" => Ok(Mode::Beginner),
            "intermediate" | "2" => Ok(Mode::Intermediate),
            "advanced" | "3" => Ok(Mode::Advanced),
            _ => Err(ParseModeError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_table() {
        let table: Vec<(u8, u32, &str)> = Mode::ALL
            .iter()
            .map(|mode| (mode.difficulty(), mode.initial_seconds(), mode.time_control()))
            .collect();
        assert_eq!(
            table,
            vec![(1, 600, "10+0"), (2, 300, "5+0"), (3, 180, "3+0")]
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Advanced".parse::<Mode>(), Ok(Mode::Advanced));
        assert_eq!("2".parse::<Mode>(), Ok(Mode::Intermediate));
        assert!("grandmaster".parse::<Mode>().is_err());
    }
}
