use std::time::Duration;

use super::mode::Mode;

/// Timing and policy knobs for a match controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Mode the controller starts in; can be changed while idle.
    pub mode: Mode,
    /// How long the opponent "thinks" before each move, and before each retry.
    pub opponent_delay: Duration,
    /// Opponent move failures tolerated before retries stop.
    pub opponent_retry_limit: u32,
    /// Pause between showing the result overlay and submitting the result.
    pub settlement_delay: Duration,
    /// Reset anyway if settlement hasn't answered by then.
    pub settlement_timeout: Duration,
    pub notification_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Beginner,
            opponent_delay: Duration::from_millis(1000),
            opponent_retry_limit: 3,
            settlement_delay: Duration::from_millis(1500),
            settlement_timeout: Duration::from_secs(30),
            notification_ttl: Duration::from_secs(3),
        }
    }
}
