//! The final result of a session

use std::fmt::Display;

use web_time::SystemTime;

use crate::{
    Counters, Ending, MetricSample, Mode, Seconds, Session, Thresholds,
    math::{Accuracy, Consistency},
};

/// Why a session did not pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Words mode: no keystroke for too long
    Inactivity,
    /// Words mode: the test ran past its absolute limit
    TimeLimit,
    /// Net speed below the configured minimum
    BelowMinSpeed,
    /// Accuracy below the configured minimum
    BelowMinAccuracy,
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Inactivity => "inactive for too long",
            Self::TimeLimit => "time limit reached",
            Self::BelowMinSpeed => "speed below minimum",
            Self::BelowMinAccuracy => "accuracy below minimum",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Failed(FailureReason),
}

impl Outcome {
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Everything known about a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// Net words per minute
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
    pub counters: Counters,
    pub mode: Mode,
    /// Seconds the test ran
    pub elapsed: Seconds,
    /// The typist was away from the keyboard at some point
    pub afk: bool,
    pub samples: Vec<MetricSample>,
    pub outcome: Outcome,
    pub completed_at: SystemTime,
}

impl SessionResult {
    /// Compute the result of an ended session, checking it against `thresholds`
    pub fn from_session(session: &Session, thresholds: &Thresholds) -> Self {
        let counters = *session.counters();
        let elapsed = session.elapsed();
        let wpm = counters.wpm(elapsed);
        let Accuracy(accuracy) = counters.accuracy();
        let Consistency(consistency) = counters.consistency();

        let outcome = match session.ending() {
            Some(Ending::Failed(reason)) => Outcome::Failed(reason),
            _ => thresholds
                .evaluate(wpm.net, accuracy)
                .map_or(Outcome::Passed, Outcome::Failed),
        };

        Self {
            wpm: wpm.net,
            raw_wpm: wpm.raw,
            accuracy,
            consistency,
            counters,
            mode: session.mode(),
            elapsed,
            afk: session.was_afk(),
            samples: session.samples().to_vec(),
            outcome,
            completed_at: SystemTime::now(),
        }
    }

    pub const fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }
}
