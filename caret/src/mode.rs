use std::fmt::Display;

use crate::{Configuration, Seconds};

/// The termination mode of a typing test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The test ends when the countdown reaches zero
    Time { seconds: Seconds },
    /// The test ends when the last of `count` words has been typed
    Words { count: usize },
}

/// The kind of a [Mode], without its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Time,
    Words,
}

impl Mode {
    pub const fn time(seconds: Seconds) -> Self {
        Self::Time { seconds }
    }

    pub const fn words(count: usize) -> Self {
        Self::Words { count }
    }

    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Time { .. } => ModeKind::Time,
            Self::Words { .. } => ModeKind::Words,
        }
    }

    /// The mode parameter: seconds for [Mode::Time], words for [Mode::Words]
    pub fn parameter(&self) -> usize {
        match *self {
            Self::Time { seconds } => seconds as usize,
            Self::Words { count } => count,
        }
    }

    pub const fn is_time(&self) -> bool {
        matches!(self, Self::Time { .. })
    }

    pub const fn is_words(&self) -> bool {
        matches!(self, Self::Words { .. })
    }

    /// How many words to generate when a session in this mode starts.
    ///
    /// Time mode has no natural word count, so it starts with a batch and is extended while
    /// typing.
    pub const fn initial_word_count(&self, config: &Configuration) -> usize {
        match *self {
            Self::Time { .. } => config.time_mode_batch,
            Self::Words { count } => count,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::time(30)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time { seconds } => write!(f, "time {seconds}"),
            Self::Words { count } => write!(f, "words {count}"),
        }
    }
}

impl Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Words => write!(f, "words"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_word_count() {
        let config = Configuration::default();

        assert_eq!(Mode::words(25).initial_word_count(&config), 25);
        assert_eq!(
            Mode::time(30).initial_word_count(&config),
            config.time_mode_batch
        );
    }

    #[test]
    fn test_parameter_and_display() {
        assert_eq!(Mode::time(60).parameter(), 60);
        assert_eq!(Mode::words(10).parameter(), 10);
        assert_eq!(Mode::time(15).to_string(), "time 15");
        assert_eq!(Mode::words(50).to_string(), "words 50");
        assert_eq!(Mode::default(), Mode::time(30));
    }
}
