//! # Session Module - A Single Typing Test
//!
//! A [Session] ties the pieces of one test together: the [CharacterGrid] holding the words,
//! the [InputReducer] grading keys, the [Clock], the [TimeSeries] of per-second speeds and
//! the [ActivityMonitor]. It owns the test lifecycle and nothing else. Word generation,
//! results and persistence live in the [SessionController](crate::SessionController).
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! - The first printable key starts the test. In words mode a space does not count.
//! - Words mode ends when the last word is typed, time mode when the countdown runs out.
//! - Once ended, keys and ticks are ignored.
//!
//! ## Usage Example
//!
//! ```rust
//! use caret::{Configuration, KeyInput, Mode, Session};
//!
//! let mut session = Session::new(Mode::time(2), &["hi", "you"], &Configuration::default()).unwrap();
//! assert!(session.is_idle());
//!
//! session.handle_key(KeyInput::Char('h'));
//! assert!(session.is_running());
//!
//! session.tick();
//! session.tick();
//! assert!(session.is_ended());
//! assert_eq!(session.samples().len(), 2);
//! ```

use crate::activity::{ActivityCheck, ActivityMonitor};
use crate::clock::{Clock, Tick};
use crate::math::Wpm;
use crate::{
    CaretMark, CharacterGrid, Configuration, Counters, FailureReason, InputReducer, KeyInput,
    Keystroke, MetricSample, Mode, Seconds, TimeSeries,
};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ending {
    /// Words mode: the last word was typed
    Completed,
    /// Time mode: the countdown ran out
    TimeUp,
    /// Words mode: an activity limit was hit
    Failed(FailureReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Waiting for the first key
    Idle,
    Running,
    Ended(Ending),
}

/// Live progress through a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Time { remaining: Seconds },
    Words { completed: usize, target: usize },
}

/// What a key did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub keystroke: Keystroke,
    /// This key started the test
    pub started: bool,
    /// This key ended the test
    pub ended: bool,
    /// This key cleared the away-from-keyboard flag
    pub afk_cleared: bool,
}

impl KeyOutcome {
    const fn ignored() -> Self {
        Self {
            keystroke: Keystroke::Ignored,
            started: false,
            ended: false,
            afk_cleared: false,
        }
    }
}

/// What a tick did to the session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The sample recorded for this second
    pub sample: Option<MetricSample>,
    /// The typist just went away from the keyboard
    pub went_afk: bool,
    /// This tick ended the test
    pub ended: bool,
}

/// A single typing test
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    grid: CharacterGrid,
    reducer: InputReducer,
    counters: Counters,
    clock: Clock,
    series: TimeSeries,
    activity: ActivityMonitor,
    lifecycle: Lifecycle,
    focused: bool,
}

impl Session {
    /// Create an idle session over `words`
    ///
    /// # Returns
    ///
    /// `None` if `words` is empty or holds an empty word.
    pub fn new<S: AsRef<str>>(mode: Mode, words: &[S], config: &Configuration) -> Option<Self> {
        let grid = CharacterGrid::new(words)?;

        Some(Self {
            mode,
            grid,
            reducer: InputReducer::new(mode),
            counters: Counters::default(),
            clock: Clock::for_mode(mode),
            series: TimeSeries::default(),
            activity: ActivityMonitor::new(config, mode),
            lifecycle: Lifecycle::Idle,
            focused: true,
        })
    }

    /// Apply a key to the session
    ///
    /// Keys after the test has ended are ignored. A printable key on an idle session starts
    /// the clock before it is graded, except a space in words mode.
    pub fn handle_key(&mut self, input: KeyInput) -> KeyOutcome {
        if self.is_ended() {
            return KeyOutcome::ignored();
        }

        let afk_cleared = self.activity.record_input(self.clock.elapsed());

        let starts = self.is_idle()
            && input.is_printable()
            && !(self.mode.is_words() && input == KeyInput::Space);
        if starts {
            self.clock.start();
            self.lifecycle = Lifecycle::Running;
            tracing::debug!(mode = %self.mode, "session started");
        }

        let reduction = self
            .reducer
            .process(input, &mut self.grid, &mut self.counters);

        if reduction.ends_test {
            self.end(Ending::Completed);
        }

        KeyOutcome {
            keystroke: reduction.keystroke,
            started: starts,
            ended: reduction.ends_test,
            afk_cleared,
        }
    }

    /// Advance the session by one second
    ///
    /// Records a sample for the new second, then checks activity. Does nothing unless the
    /// session is running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::default();
        }

        let (elapsed, expired) = match self.clock.tick() {
            Tick::Stopped => return TickOutcome::default(),
            Tick::Elapsed(elapsed) => (elapsed, false),
            Tick::Expired(elapsed) => (elapsed, true),
        };

        let sample = MetricSample::measure(elapsed, &self.counters);
        self.series.record(sample);

        let mut outcome = TickOutcome {
            sample: Some(sample),
            ..TickOutcome::default()
        };

        if expired {
            self.end(Ending::TimeUp);
            outcome.ended = true;
            return outcome;
        }

        match self.activity.check(elapsed) {
            ActivityCheck::Active => {}
            ActivityCheck::WentAfk => {
                tracing::debug!(elapsed, "typist went away from keyboard");
                outcome.went_afk = true;
            }
            ActivityCheck::Fail(reason) => {
                self.end(Ending::Failed(reason));
                outcome.ended = true;
            }
        }

        outcome
    }

    /// Stop the session's clock. The session stays in its current state.
    pub const fn stop(&mut self) {
        self.clock.stop();
    }

    fn end(&mut self, ending: Ending) {
        if self.is_ended() {
            return;
        }
        self.clock.stop();
        self.lifecycle = Lifecycle::Ended(ending);
        tracing::debug!(?ending, elapsed = self.elapsed(), "session ended");
    }

    /// Append words to the grid, for time mode running out of words
    pub(crate) fn push_words<S: AsRef<str>>(&mut self, words: &[S]) {
        self.grid.push_words(words);
    }

    pub const fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Where to draw the caret. `None` while the session is out of focus.
    pub fn caret_mark(&self) -> Option<CaretMark> {
        if !self.focused {
            return None;
        }
        self.grid.mark_caret_visual()
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn grid(&self) -> &CharacterGrid {
        &self.grid
    }

    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn samples(&self) -> &[MetricSample] {
        self.series.samples()
    }

    pub const fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Idle)
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running)
    }

    pub const fn is_ended(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ended(_))
    }

    pub const fn ending(&self) -> Option<Ending> {
        match self.lifecycle {
            Lifecycle::Ended(ending) => Some(ending),
            _ => None,
        }
    }

    /// Seconds the test has been running
    pub const fn elapsed(&self) -> Seconds {
        self.clock.elapsed()
    }

    pub const fn is_afk(&self) -> bool {
        self.activity.is_afk()
    }

    pub const fn was_afk(&self) -> bool {
        self.activity.was_afk()
    }

    /// Speed at the current elapsed time
    pub fn live_wpm(&self) -> Wpm {
        self.counters.wpm(self.elapsed())
    }

    pub fn progress(&self) -> Progress {
        match self.mode {
            Mode::Time { seconds } => Progress::Time {
                remaining: self.clock.remaining().unwrap_or(seconds),
            },
            // Words stepped back into are committed again, so the caret is the measure
            Mode::Words { count } => Progress::Words {
                completed: if self.ending() == Some(Ending::Completed) {
                    count
                } else {
                    self.grid.caret().word.min(count)
                },
                target: count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharStatus;

    fn session(mode: Mode, words: &[&str]) -> Session {
        Session::new(mode, words, &Configuration::default()).unwrap()
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.handle_key(KeyInput::from(c));
        }
    }

    #[test]
    fn test_first_printable_starts() {
        let mut session = session(Mode::time(30), &["hi"]);

        let outcome = session.handle_key(KeyInput::Backspace);
        assert!(!outcome.started);
        assert!(session.is_idle());

        let outcome = session.handle_key(KeyInput::Char('h'));
        assert!(outcome.started);
        assert!(session.is_running());
        assert!(session.clock().is_running());
    }

    #[test]
    fn test_time_mode_space_starts_but_is_rejected() {
        let mut session = session(Mode::time(30), &["hi"]);
        let outcome = session.handle_key(KeyInput::Space);

        assert!(outcome.started);
        assert_eq!(outcome.keystroke, Keystroke::Rejected);
        assert!(session.is_running());
    }

    #[test]
    fn test_words_mode_space_does_not_start() {
        let mut session = session(Mode::words(1), &["hi"]);
        let outcome = session.handle_key(KeyInput::Space);

        assert!(!outcome.started);
        assert!(session.is_idle());
    }

    #[test]
    fn test_ticks_ignored_while_idle() {
        let mut session = session(Mode::time(5), &["hi"]);
        assert_eq!(session.tick(), TickOutcome::default());
        assert!(session.samples().is_empty());
        assert_eq!(session.elapsed(), 0);
    }

    #[test]
    fn test_keys_ignored_after_end() {
        let mut session = session(Mode::words(1), &["hi"]);
        type_text(&mut session, "hi");
        assert_eq!(session.ending(), Some(Ending::Completed));

        let counters = *session.counters();
        let outcome = session.handle_key(KeyInput::Char('x'));
        assert_eq!(outcome.keystroke, Keystroke::Ignored);
        assert_eq!(*session.counters(), counters);
        assert_eq!(session.tick(), TickOutcome::default());
    }

    #[test]
    fn test_time_up() {
        let mut session = session(Mode::time(3), &["hello", "world"]);
        type_text(&mut session, "hel");

        assert!(!session.tick().ended);
        assert!(!session.tick().ended);
        let outcome = session.tick();
        assert!(outcome.ended);
        assert_eq!(session.ending(), Some(Ending::TimeUp));
        assert_eq!(session.samples().len(), 3);
        assert_eq!(session.elapsed(), 3);
    }

    #[test]
    fn test_afk_cleared_by_key() {
        let mut session = session(Mode::time(60), &["hello", "world"]);
        type_text(&mut session, "h");

        let went_afk = (0..5).map(|_| session.tick()).any(|outcome| outcome.went_afk);
        assert!(went_afk);
        assert!(session.is_afk());

        let outcome = session.handle_key(KeyInput::Char('e'));
        assert!(outcome.afk_cleared);
        assert!(!session.is_afk());
        assert!(session.was_afk());
    }

    #[test]
    fn test_focus_hides_caret() {
        let mut session = session(Mode::time(60), &["hi"]);
        assert!(session.caret_mark().is_some());

        session.set_focus(false);
        assert_eq!(session.caret_mark(), None);

        // Keys still count while unfocused
        session.handle_key(KeyInput::Char('h'));
        assert_eq!(
            session.grid().get_word(0).unwrap().get(0).unwrap().status,
            CharStatus::Correct
        );
    }

    #[test]
    fn test_progress() {
        let mut session = session(Mode::words(2), &["hi", "yo"]);
        type_text(&mut session, "hi ");
        assert_eq!(
            session.progress(),
            Progress::Words {
                completed: 1,
                target: 2
            }
        );

        let session = self::session(Mode::time(15), &["hi"]);
        assert_eq!(session.progress(), Progress::Time { remaining: 15 });
    }

    #[test]
    fn test_progress_after_stepping_back() {
        let mut session = session(Mode::words(3), &["hi", "yo", "ok"]);
        type_text(&mut session, "hx ");
        session.handle_key(KeyInput::Backspace);
        session.handle_key(KeyInput::Backspace);
        type_text(&mut session, "i ");

        assert_eq!(session.counters().completed_words, 2);
        assert_eq!(
            session.progress(),
            Progress::Words {
                completed: 1,
                target: 3
            }
        );

        type_text(&mut session, "yo ok");
        assert_eq!(
            session.progress(),
            Progress::Words {
                completed: 3,
                target: 3
            }
        );
    }
}
