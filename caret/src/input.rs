//! # Input Module - Keystroke Classification and Grading
//!
//! Raw key events are first classified into a [KeyInput], then the [InputReducer] applies
//! them to a [CharacterGrid] and the session [Counters]:
//!
//! - A space commits the current word, marking untyped characters as missed
//! - A backspace clears the previous slot, drops an extra character, or steps back into the
//!   previous word if that word holds an error
//! - A printable character is graded against the expected glyph, or appended as an extra
//!   past the end of the word
//!
//! Counters only ever grow. Deleting a character does not take back what was counted when
//! it was typed.
//!
//! ## Input Processing Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/input_flow.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use caret::{CharacterGrid, CharStatus, Counters, InputReducer, KeyInput, Keystroke, Mode};
//!
//! let reducer = InputReducer::new(Mode::words(1));
//! let mut grid = CharacterGrid::new(&["hi"]).unwrap();
//! let mut counters = Counters::default();
//!
//! let reduction = reducer.process(KeyInput::Char('h'), &mut grid, &mut counters);
//! assert_eq!(reduction.keystroke, Keystroke::Typed(CharStatus::Correct));
//! assert!(!reduction.ends_test);
//! ```

use crate::{Caret, CharStatus, CharacterGrid, Counters, Mode};

/// A classified key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// A single printable, non-space character
    Char(char),
    Space,
    Backspace,
    /// Keys with a meaning outside of typing, like Tab. Never graded.
    Control,
    /// Anything else: modifiers, arrows, function keys
    Other,
}

impl KeyInput {
    /// Classify a key by its DOM-style name (`"a"`, `" "`, `"Backspace"`, `"Tab"`, `"Shift"`)
    pub fn from_key(key: &str) -> Self {
        match key {
            " " => Self::Space,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Control,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Returns true for keys that can start a test: characters and space
    pub const fn is_printable(self) -> bool {
        matches!(self, Self::Char(_) | Self::Space)
    }
}

impl From<char> for KeyInput {
    fn from(value: char) -> Self {
        match value {
            ' ' => Self::Space,
            '\t' => Self::Control,
            '\u{8}' | '\u{7f}' => Self::Backspace,
            c if c.is_control() || c.is_whitespace() => Self::Other,
            c => Self::Char(c),
        }
    }
}

/// The effect a key had on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// The key has no meaning here
    Ignored,
    /// The key is meaningful but not allowed at the current caret position
    Rejected,
    /// A character was graded with this status
    Typed(CharStatus),
    /// The current word was committed
    Committed { correct: bool, missed: usize },
    /// A slot was cleared. Holds the status it had.
    Deleted(CharStatus),
    /// The caret moved back into the previous word
    SteppedBack,
}

/// The result of reducing a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    pub keystroke: Keystroke,
    /// The key completed the last word of a words-mode test
    pub ends_test: bool,
}

impl From<Keystroke> for Reduction {
    fn from(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            ends_test: false,
        }
    }
}

/// Applies classified keys to a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReducer {
    mode: Mode,
}

impl InputReducer {
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Apply a single key to the grid and counters.
    ///
    /// Lifecycle rules, like starting the clock or ignoring keys after the test has ended,
    /// are left to the caller.
    pub fn process(
        &self,
        input: KeyInput,
        grid: &mut CharacterGrid,
        counters: &mut Counters,
    ) -> Reduction {
        if grid.current_word().is_none() {
            return Keystroke::Ignored.into();
        }

        match input {
            KeyInput::Space => self.commit_word(grid, counters),
            KeyInput::Backspace => Self::delete(grid).into(),
            KeyInput::Char(c) => self.type_char(c, grid, counters),
            KeyInput::Control | KeyInput::Other => Keystroke::Ignored.into(),
        }
    }

    fn commit_word(&self, grid: &mut CharacterGrid, counters: &mut Counters) -> Reduction {
        let Caret { word, char } = grid.caret();
        if char == 0 {
            return Keystroke::Rejected.into();
        }

        let is_last = grid.is_last_word();
        if is_last && self.mode.is_time() {
            return Keystroke::Rejected.into();
        }

        let Some(current) = grid.current_word_mut() else {
            return Keystroke::Ignored.into();
        };

        let correct = char == current.len() && current.is_perfect();
        let missed = if char < current.len() {
            current.mark_missed_from(char)
        } else {
            0
        };

        counters.missed_char += missed;
        counters.completed_words += 1;
        if correct {
            counters.correct_word += 1;
        }

        let keystroke = Keystroke::Committed { correct, missed };
        if is_last {
            grid.set_caret(Caret::new(word, char + missed));
            return Reduction {
                keystroke,
                ends_test: true,
            };
        }

        grid.set_caret(Caret::new(word + 1, 0));
        keystroke.into()
    }

    fn delete(grid: &mut CharacterGrid) -> Keystroke {
        let Caret { word, char } = grid.caret();

        if char > 0 {
            let Some(current) = grid.current_word_mut() else {
                return Keystroke::Ignored;
            };

            let previous = match current.pop_extra() {
                Some(extra) => Some(extra.status),
                None => current.set_status(char - 1, CharStatus::Pending),
            };
            grid.set_caret(Caret::new(word, char - 1));
            return previous.map_or(Keystroke::Ignored, Keystroke::Deleted);
        }

        if word == 0 {
            return Keystroke::Ignored;
        }

        if !grid.word_has_error(word - 1) {
            return Keystroke::Rejected;
        }

        let end = grid.get_word(word - 1).map_or(0, |previous| previous.len());
        grid.set_caret(Caret::new(word - 1, end));
        Keystroke::SteppedBack
    }

    fn type_char(&self, glyph: char, grid: &mut CharacterGrid, counters: &mut Counters) -> Reduction {
        let Caret { word, char } = grid.caret();
        let is_last = grid.is_last_word();

        let Some(current) = grid.current_word_mut() else {
            return Keystroke::Ignored.into();
        };

        if char >= current.len() {
            current.push_extra(glyph);
            counters.extra_char += 1;
            grid.set_caret(Caret::new(word, char + 1));
            return Keystroke::Typed(CharStatus::Extra).into();
        }

        let expected = current.characters()[char].glyph;
        let status = if glyph == expected {
            counters.correct_char += 1;
            CharStatus::Correct
        } else {
            counters.incorrect_char += 1;
            CharStatus::Incorrect
        };
        current.set_status(char, status);

        let ends_test = self.mode.is_words() && is_last && char + 1 == current.len();
        if ends_test {
            counters.completed_words += 1;
            if current.is_perfect() {
                counters.correct_word += 1;
            }
        }

        grid.set_caret(Caret::new(word, char + 1));
        Reduction {
            keystroke: Keystroke::Typed(status),
            ends_test,
        }
    }
}
