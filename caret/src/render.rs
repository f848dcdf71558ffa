//! Read-only views of a session for drawing
//!
//! Shells never look into the grid to decide what to draw. They walk [RenderingContext]s,
//! grouped into words and lines, and style each character by its status and caret flag.
//!
//! ```rust
//! use caret::render::LineRenderConfig;
//! use caret::{Configuration, Mode, Session};
//!
//! let words = ["hello", "world", "this", "is", "a", "test"];
//! let session = Session::new(Mode::words(6), &words, &Configuration::default()).unwrap();
//!
//! let lines: Vec<String> = session.render_lines(
//!     |line| {
//!         let words: Vec<String> = line.words.iter().map(|word| word.word.text()).collect();
//!         Some(words.join(" "))
//!     },
//!     LineRenderConfig::new(11),
//! );
//!
//! assert_eq!(lines, ["hello world", "this is a", "test"]);
//! ```

use crate::{CaretMark, Character, Session, Word};

/// Which side of a character the caret is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretSide {
    Before,
    After,
}

pub struct RenderingContext<'a> {
    pub character: &'a Character,
    pub word_index: usize,
    pub char_index: usize,
    pub caret: Option<CaretSide>,
}

pub struct WordContext<'a> {
    pub index: usize,
    pub word: &'a Word,
    /// The caret is in this word
    pub is_current: bool,
    /// The word has been passed and holds an error
    pub is_marked: bool,
    pub contents: Vec<RenderingContext<'a>>,
}

pub struct LineContext<'a> {
    /// Lines from the caret's line: negative above, positive below
    pub active_line_offset: isize,
    pub words: Vec<WordContext<'a>>,
}

/// Configuration for line rendering behavior
pub struct LineRenderConfig {
    /// Maximum number of characters per line, including spacing
    pub line_length: usize,
    /// Columns between words
    pub word_spacing: usize,
}

impl LineRenderConfig {
    pub const fn new(line_length: usize) -> Self {
        Self {
            line_length,
            word_spacing: 1,
        }
    }

    pub const fn with_word_spacing(mut self, word_spacing: usize) -> Self {
        self.word_spacing = word_spacing;
        self
    }
}

/// Iterator over the words of a session
pub struct RenderingIterator<'a> {
    session: &'a Session,
    caret: Option<CaretMark>,
    index: usize,
}

impl<'a> From<&'a Session> for RenderingIterator<'a> {
    fn from(value: &'a Session) -> Self {
        Self {
            caret: value.caret_mark(),
            index: 0,
            session: value,
        }
    }
}

impl ExactSizeIterator for RenderingIterator<'_> {}

impl std::iter::FusedIterator for RenderingIterator<'_> {}

impl<'a> Iterator for RenderingIterator<'a> {
    type Item = WordContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let grid = self.session.grid();
        let word = grid.get_word(self.index)?;
        let word_index = self.index;
        let current = grid.caret().word;

        let contents = word
            .characters()
            .iter()
            .enumerate()
            .map(|(char_index, character)| RenderingContext {
                character,
                word_index,
                char_index,
                caret: caret_side(self.caret, word_index, char_index),
            })
            .collect();

        self.index += 1;
        Some(WordContext {
            index: word_index,
            word,
            is_current: word_index == current,
            is_marked: word_index < current && word.has_error(),
            contents,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.session.grid().word_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

fn caret_side(mark: Option<CaretMark>, word: usize, char: usize) -> Option<CaretSide> {
    match mark? {
        CaretMark::On { word: w, char: c } if w == word && c == char => Some(CaretSide::Before),
        CaretMark::End { word: w, char: c } if w == word && c == char => Some(CaretSide::After),
        _ => None,
    }
}

impl Session {
    /// Iterate over the words of the session with their rendering contexts
    pub fn render_iter(&self) -> RenderingIterator<'_> {
        RenderingIterator::from(self)
    }

    /// Lay the words out in lines and render each line with `line_renderer`
    ///
    /// Words are never split. A word longer than `line_length` gets a line of its own.
    /// Lines for which `line_renderer` returns `None` are left out.
    pub fn render_lines<Line, F: FnMut(LineContext) -> Option<Line>>(
        &self,
        mut line_renderer: F,
        config: LineRenderConfig,
    ) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut current_line = Vec::new();
        let mut current_width = 0;
        let mut caret_line = 0;

        for word in self.render_iter() {
            let len = word.contents.len();
            let mut width = if current_line.is_empty() {
                len
            } else {
                current_width + config.word_spacing + len
            };

            if !current_line.is_empty() && width > config.line_length {
                lines.push(std::mem::take(&mut current_line));
                width = len;
            }

            if word.is_current {
                caret_line = lines.len();
            }

            current_width = width;
            current_line.push(word);
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        lines
            .into_iter()
            .enumerate()
            .filter_map(|(index, words)| {
                line_renderer(LineContext {
                    active_line_offset: index as isize - caret_line as isize,
                    words,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharStatus, Configuration, KeyInput, Mode};

    fn session(words: &[&str]) -> Session {
        Session::new(Mode::time(30), words, &Configuration::default()).unwrap()
    }

    #[test]
    fn test_caret_before_next_char() {
        let mut session = session(&["hi", "you"]);
        session.handle_key(KeyInput::Char('h'));

        let words: Vec<_> = session.render_iter().collect();
        assert_eq!(words[0].contents[1].caret, Some(CaretSide::Before));
        assert_eq!(words[0].contents[0].caret, None);
        assert!(words[0].is_current);
        assert!(!words[1].is_current);
    }

    #[test]
    fn test_caret_after_typed_word() {
        let mut session = session(&["hi", "you"]);
        session.handle_key(KeyInput::Char('h'));
        session.handle_key(KeyInput::Char('i'));
        session.handle_key(KeyInput::Char('x'));

        let words: Vec<_> = session.render_iter().collect();
        assert_eq!(words[0].contents.len(), 3);
        assert_eq!(words[0].contents[2].character.status, CharStatus::Extra);
        assert_eq!(words[0].contents[2].caret, Some(CaretSide::After));

        let carets = words
            .iter()
            .flat_map(|word| &word.contents)
            .filter(|context| context.caret.is_some())
            .count();
        assert_eq!(carets, 1);
    }

    #[test]
    fn test_no_caret_when_unfocused() {
        let mut session = session(&["hi"]);
        session.set_focus(false);
        assert!(
            session
                .render_iter()
                .flat_map(|word| word.contents)
                .all(|context| context.caret.is_none())
        );
    }

    #[test]
    fn test_passed_error_words_marked() {
        let mut session = session(&["hi", "you", "all"]);
        for c in "h you ".chars() {
            session.handle_key(KeyInput::from(c));
        }

        let marked: Vec<bool> = session.render_iter().map(|word| word.is_marked).collect();
        assert_eq!(marked, [true, false, false]);
    }

    #[test]
    fn test_line_offsets_follow_caret() {
        let mut session = session(&["aaaa", "bbbb", "cccc", "dddd"]);
        for c in "aaaa bbbb c".chars() {
            session.handle_key(KeyInput::from(c));
        }

        let offsets = session.render_lines(
            |line| Some(line.active_line_offset),
            LineRenderConfig::new(9),
        );
        assert_eq!(offsets, [-1, 0]);
    }

    #[test]
    fn test_long_word_gets_own_line() {
        let session = session(&["a", "abcdefghijkl", "b"]);
        let lengths = session.render_lines(
            |line| Some(line.words.len()),
            LineRenderConfig::new(5),
        );
        assert_eq!(lengths, [1, 1, 1]);
    }
}
