use super::mode::Mode;
use super::side::Side;

/// What a one-second tick did to the pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tick {
    /// The side's clock is still running with this many seconds left.
    Running(u32),
    /// The side's clock reached zero. The pair has stopped itself.
    Expired,
    /// The side's clock was not running, so nothing changed.
    Ignored,
}

/// Countdown clocks for both sides. At most one is running, always the one whose turn it is.
///
/// The pair only keeps the counters. Scheduling the once-per-second tick is the controller's
/// job, which lets tests drive the clocks in virtual time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockPair {
    player_seconds: u32,
    opponent_seconds: u32,
    running: Option<Side>,
}

impl ClockPair {
    pub fn new(mode: Mode) -> Self {
        Self {
            player_seconds: mode.initial_seconds(),
            opponent_seconds: mode.initial_seconds(),
            running: None,
        }
    }

    /// Stops whichever clock is running and starts `side`'s.
    pub fn start(&mut self, side: Side) {
        self.running = Some(side);
    }

    pub fn stop(&mut self) {
        self.running = None;
    }

    pub fn reset(&mut self, mode: Mode) {
        *self = Self::new(mode);
    }

    pub fn running(&self) -> Option<Side> {
        self.running
    }

    pub fn remaining(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_seconds,
            Side::Opponent => self.opponent_seconds,
        }
    }

    pub fn tick(&mut self, side: Side) -> Tick {
        if self.running != Some(side) {
            return Tick::Ignored;
        }
        let seconds = match side {
            Side::Player => &mut self.player_seconds,
            Side::Opponent => &mut self.opponent_seconds,
        };
        *seconds = seconds.saturating_sub(1);
        if *seconds == 0 {
            self.running = None;
            Tick::Expired
        } else {
            Tick::Running(*seconds)
        }
    }

    /// `mm:ss` rendering of a side's remaining time.
    pub fn display(&self, side: Side) -> String {
        format_clock(self.remaining(side))
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clocks_are_stopped_at_mode_allotment() {
        let clock = ClockPair::new(Mode::Intermediate);
        assert_eq!(clock.remaining(Side::Player), 300);
        assert_eq!(clock.remaining(Side::Opponent), 300);
        assert_eq!(clock.running(), None);
    }

    #[test]
    fn test_only_running_side_ticks() {
        let mut clock = ClockPair::new(Mode::Beginner);
        clock.start(Side::Player);
        assert_eq!(clock.tick(Side::Player), Tick::Running(599));
        assert_eq!(clock.tick(Side::Opponent), Tick::Ignored);

        clock.start(Side::Opponent);
        assert_eq!(clock.running(), Some(Side::Opponent));
        assert_eq!(clock.tick(Side::Player), Tick::Ignored);
        assert_eq!(clock.tick(Side::Opponent), Tick::Running(599));
        assert_eq!(clock.remaining(Side::Player), 599);
    }

    #[test]
    fn test_expiry_stops_the_pair() {
        let mut clock = ClockPair::new(Mode::Advanced);
        clock.start(Side::Opponent);
        for expected in (1..180).rev() {
            assert_eq!(clock.tick(Side::Opponent), Tick::Running(expected));
        }
        assert_eq!(clock.tick(Side::Opponent), Tick::Expired);
        assert_eq!(clock.running(), None);
        assert_eq!(clock.tick(Side::Opponent), Tick::Ignored);
        assert_eq!(clock.remaining(Side::Opponent), 0);
    }

    #[test]
    fn test_reset_restores_allotment() {
        let mut clock = ClockPair::new(Mode::Beginner);
        clock.start(Side::Player);
        clock.tick(Side::Player);
        clock.reset(Mode::Advanced);
        assert_eq!(clock, ClockPair::new(Mode::Advanced));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(179), "02:59");
        assert_eq!(format_clock(0), "00:00");
    }
}
