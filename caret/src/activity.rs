//! Away-from-keyboard detection and the words-mode failure limits
//!
//! Activity is measured in clock seconds. A keystroke records the elapsed seconds at which
//! it happened, and every tick compares that against the new elapsed time.

use crate::{Configuration, FailureReason, Mode, Seconds};

/// What a tick means for the typist's activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCheck {
    Active,
    /// The typist just crossed the away-from-keyboard threshold
    WentAfk,
    /// The test must end as failed
    Fail(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityMonitor {
    afk_after: Seconds,
    /// Idle and total limits. Only words mode has them.
    limits: Option<(Seconds, Seconds)>,
    last_input: Seconds,
    afk: bool,
    was_afk: bool,
}

impl ActivityMonitor {
    pub const fn new(config: &Configuration, mode: Mode) -> Self {
        let limits = match mode {
            Mode::Words { .. } => Some((
                config.inactivity_limit_seconds,
                config.words_time_limit_seconds,
            )),
            Mode::Time { .. } => None,
        };

        Self {
            afk_after: config.afk_after_seconds,
            limits,
            last_input: 0,
            afk: false,
            was_afk: false,
        }
    }

    /// Record a keystroke at `elapsed` seconds. Returns true if this cleared the AFK flag.
    pub const fn record_input(&mut self, elapsed: Seconds) -> bool {
        self.last_input = elapsed;
        let cleared = self.afk;
        self.afk = false;
        cleared
    }

    /// Check activity after the clock reached `elapsed` seconds
    pub const fn check(&mut self, elapsed: Seconds) -> ActivityCheck {
        let idle = self.idle_seconds(elapsed);

        if let Some((inactivity_limit, time_limit)) = self.limits {
            if elapsed >= time_limit {
                return ActivityCheck::Fail(FailureReason::TimeLimit);
            }
            if idle >= inactivity_limit {
                return ActivityCheck::Fail(FailureReason::Inactivity);
            }
        }

        if !self.afk && idle >= self.afk_after {
            self.afk = true;
            self.was_afk = true;
            return ActivityCheck::WentAfk;
        }

        ActivityCheck::Active
    }

    pub const fn idle_seconds(&self, elapsed: Seconds) -> Seconds {
        elapsed.saturating_sub(self.last_input)
    }

    /// Returns true while the typist is away
    pub const fn is_afk(&self) -> bool {
        self.afk
    }

    /// Returns true if the typist has been away at any point of the session
    pub const fn was_afk(&self) -> bool {
        self.was_afk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(mode: Mode) -> ActivityMonitor {
        ActivityMonitor::new(&Configuration::default(), mode)
    }

    #[test]
    fn test_afk_after_five_idle_seconds() {
        let mut activity = monitor(Mode::time(60));
        activity.record_input(0);

        for elapsed in 1..5 {
            assert_eq!(activity.check(elapsed), ActivityCheck::Active);
        }
        assert_eq!(activity.check(5), ActivityCheck::WentAfk);
        assert!(activity.is_afk());
        // Reported once
        assert_eq!(activity.check(6), ActivityCheck::Active);

        assert!(activity.record_input(7));
        assert!(!activity.is_afk());
        assert!(activity.was_afk());
        assert!(!activity.record_input(8));
    }

    #[test]
    fn test_time_mode_never_fails() {
        let mut activity = monitor(Mode::time(600));
        activity.record_input(0);
        for elapsed in 1..=400 {
            assert!(!matches!(activity.check(elapsed), ActivityCheck::Fail(_)));
        }
    }

    #[test]
    fn test_words_mode_inactivity() {
        let mut activity = monitor(Mode::words(25));
        activity.record_input(10);

        assert!(!matches!(activity.check(39), ActivityCheck::Fail(_)));
        assert_eq!(
            activity.check(40),
            ActivityCheck::Fail(FailureReason::Inactivity)
        );
    }

    #[test]
    fn test_words_mode_time_limit() {
        let mut activity = monitor(Mode::words(25));
        activity.record_input(299);
        assert_eq!(
            activity.check(300),
            ActivityCheck::Fail(FailureReason::TimeLimit)
        );
    }
}
