//! The one-second session clock
//!
//! The clock does not read wall time. The shell calls [Clock::tick] once per second while
//! the test runs, which keeps the engine deterministic under test.

use crate::{Mode, Seconds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Counts `remaining` down from `target`
    Countdown { target: Seconds, remaining: Seconds },
    /// Counts elapsed seconds up with no bound
    CountUp { elapsed: Seconds },
}

/// The result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The clock is not running, nothing happened
    Stopped,
    /// One second passed. Holds the elapsed seconds.
    Elapsed(Seconds),
    /// The countdown reached zero and the clock stopped. Holds the elapsed seconds.
    Expired(Seconds),
}

/// A countdown for time mode, a stopwatch for words mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    direction: Direction,
    running: bool,
}

impl Clock {
    pub const fn for_mode(mode: Mode) -> Self {
        let direction = match mode {
            Mode::Time { seconds } => Direction::Countdown {
                target: seconds,
                remaining: seconds,
            },
            Mode::Words { .. } => Direction::CountUp { elapsed: 0 },
        };

        Self {
            direction,
            running: false,
        }
    }

    /// Start the clock. Returns false if it was already running.
    pub const fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop the clock. Stopping a stopped clock does nothing.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds elapsed since the clock started
    pub const fn elapsed(&self) -> Seconds {
        match self.direction {
            Direction::Countdown { target, remaining } => target.saturating_sub(remaining),
            Direction::CountUp { elapsed } => elapsed,
        }
    }

    /// Seconds left on a countdown, `None` for a stopwatch
    pub const fn remaining(&self) -> Option<Seconds> {
        match self.direction {
            Direction::Countdown { remaining, .. } => Some(remaining),
            Direction::CountUp { .. } => None,
        }
    }

    /// Advance the clock by one second
    pub const fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Stopped;
        }

        match &mut self.direction {
            Direction::Countdown { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.running = false;
                    Tick::Expired(self.elapsed())
                } else {
                    Tick::Elapsed(self.elapsed())
                }
            }
            Direction::CountUp { elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                Tick::Elapsed(*elapsed)
            }
        }
    }
}
