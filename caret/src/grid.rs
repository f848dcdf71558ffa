//! # Grid Module - Per-Character Typing State
//!
//! The [CharacterGrid] is the ordered list of words a typist works through. Every word is a
//! list of [Character]s that carry a [CharStatus], and words grow past their original length
//! when the typist types extra characters. A single [Caret] points at the next slot to type.
//!
//! ## Data Structure
//!
#![doc = simple_mermaid::mermaid!("../diagrams/grid_structure.mmd")]
//!
//! Layout example: words `["hi", "you"]` after typing `hx you`
//! ```text
//! Word 0:  [h:correct][i:incorrect]
//! Word 1:  [y:correct][o:correct][u:correct]
//! Caret:   word 1, char 3 (after the last character)
//! ```
//!
//! Spaces between words are never stored. A space commits the current word and moves the
//! caret to the start of the next one.

/// The grading state of a single character slot
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharStatus {
    /// Not typed yet
    #[default]
    Pending,
    /// Typed and matching
    Correct,
    /// Typed and not matching
    Incorrect,
    /// Typed past the end of the word
    Extra,
    /// Skipped when the word was committed early
    Missed,
}

impl CharStatus {
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Incorrect | Self::Extra | Self::Missed)
    }
}

/// A single character slot in a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    /// The expected glyph, or the typed glyph for [CharStatus::Extra]
    pub glyph: char,
    pub status: CharStatus,
}

impl Character {
    pub const fn pending(glyph: char) -> Self {
        Self {
            glyph,
            status: CharStatus::Pending,
        }
    }
}

/// A word in the grid: its original characters followed by any extras
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    characters: Vec<Character>,
    original_len: usize,
}

impl Word {
    pub fn new(text: &str) -> Self {
        let characters: Vec<Character> = text.chars().map(Character::pending).collect();
        let original_len = characters.len();
        Self {
            characters,
            original_len,
        }
    }

    /// Current length, including extra characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Length of the word as generated
    pub const fn original_len(&self) -> usize {
        self.original_len
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    /// The word as generated, without extras
    pub fn text(&self) -> String {
        self.characters[..self.original_len]
            .iter()
            .map(|character| character.glyph)
            .collect()
    }

    /// Returns true if any slot is incorrect, extra or missed
    pub fn has_error(&self) -> bool {
        self.characters
            .iter()
            .any(|character| character.status.is_error())
    }

    /// Returns true if the word was typed exactly as generated
    pub fn is_perfect(&self) -> bool {
        self.characters.len() == self.original_len
            && self
                .characters
                .iter()
                .all(|character| character.status == CharStatus::Correct)
    }

    pub(crate) fn set_status(&mut self, index: usize, status: CharStatus) -> Option<CharStatus> {
        let character = self.characters.get_mut(index)?;
        Some(std::mem::replace(&mut character.status, status))
    }

    pub(crate) fn push_extra(&mut self, glyph: char) {
        self.characters.push(Character {
            glyph,
            status: CharStatus::Extra,
        });
    }

    pub(crate) fn pop_extra(&mut self) -> Option<Character> {
        if self.characters.len() > self.original_len {
            self.characters.pop()
        } else {
            None
        }
    }

    /// Mark every slot from `index` to the end as missed, returning how many were marked
    pub(crate) fn mark_missed_from(&mut self, index: usize) -> usize {
        let Some(rest) = self.characters.get_mut(index..) else {
            return 0;
        };

        for character in rest.iter_mut() {
            character.status = CharStatus::Missed;
        }
        rest.len()
    }
}

/// Position of the next slot to type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caret {
    pub word: usize,
    pub char: usize,
}

impl Caret {
    pub const fn new(word: usize, char: usize) -> Self {
        Self { word, char }
    }
}

/// Where the caret should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMark {
    /// Before the character at this slot
    On { word: usize, char: usize },
    /// After the last character of the word, once it has been typed through
    End { word: usize, char: usize },
}

/// The words of a session with their per-character state and the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    words: Vec<Word>,
    caret: Caret,
}

impl CharacterGrid {
    /// Create a new grid from generated words
    ///
    /// # Returns
    ///
    /// `None` if there are no words or any word is empty.
    pub fn new<S: AsRef<str>>(words: &[S]) -> Option<Self> {
        let words: Vec<Word> = words.iter().map(|word| Word::new(word.as_ref())).collect();
        if words.is_empty() || words.iter().any(Word::is_empty) {
            return None;
        }

        Some(Self {
            words,
            caret: Caret::default(),
        })
    }

    pub const fn caret(&self) -> Caret {
        self.caret
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn get_word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.caret.word)
    }

    pub(crate) fn current_word_mut(&mut self) -> Option<&mut Word> {
        self.words.get_mut(self.caret.word)
    }

    /// Returns true if the caret is on the last word of the grid
    pub fn is_last_word(&self) -> bool {
        self.caret.word + 1 == self.words.len()
    }

    /// Returns true if the word at `index` holds any incorrect, extra or missed slot
    pub fn word_has_error(&self, index: usize) -> bool {
        self.words.get(index).is_some_and(Word::has_error)
    }

    /// Where the caret should be drawn.
    ///
    /// The caret sits on the slot it points at, or on a virtual end marker after the last
    /// character once the word has been typed through.
    pub fn mark_caret_visual(&self) -> Option<CaretMark> {
        let Caret { word, char } = self.caret;
        let len = self.words.get(word)?.len();

        if char < len {
            Some(CaretMark::On { word, char })
        } else {
            Some(CaretMark::End {
                word,
                char: len.saturating_sub(1),
            })
        }
    }

    /// Total characters of the words as generated
    pub fn original_char_count(&self) -> usize {
        self.words.iter().map(Word::original_len).sum()
    }

    pub(crate) const fn set_caret(&mut self, caret: Caret) {
        self.caret = caret;
    }

    /// Append words at the end, leaving the caret untouched
    pub(crate) fn push_words<S: AsRef<str>>(&mut self, words: &[S]) {
        self.words.extend(
            words
                .iter()
                .map(|word| Word::new(word.as_ref()))
                .filter(|word| !word.is_empty()),
        );
    }
}
