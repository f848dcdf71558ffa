//! Word sources for seeding a session
//!
//! A [WordSource] produces the words a typist is asked to type. [WordList] samples from a
//! fixed vocabulary (the built-in English list or a user supplied one), and [Fallback]
//! chains two sources so a failing primary never leaves a session without words.

use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

/// Errors that can occur while generating words
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Requested an empty word sequence")]
    EmptyRequest,
    #[error("Word source '{0}' has no usable words")]
    Exhausted(String),
    #[error("Word source '{name}' is unavailable: {reason}")]
    Unavailable { name: String, reason: String },
}

/// Produces sequences of lowercase words without whitespace
pub trait WordSource {
    /// Generate exactly `count` words.
    ///
    /// Implementations must return [GenerationError::EmptyRequest] for a `count` of zero.
    fn generate(&mut self, count: usize) -> Result<Vec<String>, GenerationError>;

    /// A short name used in logs and errors
    fn name(&self) -> &str;
}

impl<S: WordSource + ?Sized> WordSource for Box<S> {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, GenerationError> {
        (**self).generate(count)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A vocabulary that words are drawn from uniformly, with repetition
#[derive(Debug, Clone)]
pub struct WordList {
    name: String,
    words: Vec<String>,
    rng: StdRng,
}

impl WordList {
    /// Build a list from any vocabulary.
    ///
    /// Entries are trimmed and lowercased. Empty entries and entries containing whitespace are
    /// dropped, so a list can end up empty and fail on [WordSource::generate].
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty() && !word.contains(char::is_whitespace))
            .collect();

        Self {
            name: name.into(),
            words,
            rng: StdRng::from_entropy(),
        }
    }

    /// The built-in list of common English words
    pub fn english() -> Self {
        Self::new("english", ENGLISH)
    }

    /// Make sampling reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for WordList {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::EmptyRequest);
        }

        if self.words.is_empty() {
            return Err(GenerationError::Exhausted(self.name.clone()));
        }

        let len = self.words.len();
        Ok((0..count)
            .map(|_| self.words[self.rng.gen_range(0..len)].clone())
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Generates from `primary`, and from `fallback` whenever `primary` fails
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: WordSource, F: WordSource> Fallback<P, F> {
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: WordSource, F: WordSource> WordSource for Fallback<P, F> {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::EmptyRequest);
        }

        match self.primary.generate(count) {
            Ok(words) => Ok(words),
            Err(error) => {
                tracing::warn!(
                    %error,
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    "word source failed, using fallback"
                );
                self.fallback.generate(count)
            }
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

const ENGLISH: &[&str] = &[
    "the", "be", "of", "and", "a", "to", "in", "he", "have", "it", "that", "for", "they", "with",
    "as", "not", "on", "she", "at", "by", "this", "we", "you", "do", "but", "from", "or", "which",
    "one", "would", "all", "will", "there", "say", "who", "make", "when", "can", "more", "if",
    "no", "man", "out", "other", "so", "what", "time", "up", "go", "about", "than", "into",
    "could", "state", "only", "new", "year", "some", "take", "come", "these", "know", "see",
    "use", "get", "like", "then", "first", "any", "work", "now", "may", "such", "give", "over",
    "think", "most", "even", "find", "day", "also", "after", "way", "many", "must", "look",
    "before", "great", "back", "through", "long", "where", "much", "should", "well", "people",
    "down", "own", "just", "because", "good", "each", "those", "feel", "seem", "how", "high",
    "too", "place", "little", "world", "very", "still", "nation", "hand", "old", "life", "tell",
    "write", "become", "here", "show", "house", "both", "between", "need", "mean", "call",
    "develop", "under", "last", "right", "move", "thing", "general", "school", "never", "same",
    "another", "begin", "while", "number", "part", "turn", "real", "leave", "might", "want",
    "point", "form", "off", "child", "few", "small", "since", "against", "ask", "late", "home",
    "interest", "large", "person", "end", "open", "public", "follow", "during", "present",
    "without", "again", "hold", "govern", "around", "possible", "head", "consider", "word",
    "program", "problem", "however", "lead", "system", "set", "order", "eye", "plan", "run",
    "keep", "face", "fact", "group", "play", "stand", "increase", "early", "course", "change",
    "help", "line", "city", "put", "close", "case", "force", "meet", "once", "water", "upon",
    "war", "build", "hear", "light", "unite", "live", "every", "country", "bring", "center",
    "let", "side", "try", "provide", "continue", "name", "certain", "power", "pay", "result",
    "question", "study", "woman", "member", "until", "far", "night", "always", "service", "away",
    "report", "something", "company", "week", "church", "toward", "start", "social", "room",
    "figure", "nature", "though", "young", "less", "enough", "almost", "read", "include",
    "president", "nothing", "yet", "better", "big", "boy", "cost", "business", "value",
    "second", "why", "clear", "expect", "family", "complete", "act", "sense", "mind",
    "experience", "art", "next", "near", "direct", "car", "law", "industry", "important",
    "girl", "god", "several", "matter", "usual", "rather", "per", "often", "kind", "among",
    "white", "reason", "action", "return", "foot", "care", "simple", "within", "love", "human",
    "along", "appear", "doctor", "believe", "speak", "active", "student", "month", "drive",
    "concern", "best", "door", "hope", "example", "inform", "body", "ever", "least",
    "probable", "understand", "reach", "effect", "different", "idea", "whole", "control",
    "condition", "field", "pass", "fall", "note", "special", "talk", "particular", "today",
    "measure", "walk", "teach", "low", "hour", "type", "carry", "rate", "remain", "full",
    "street", "easy", "although", "record", "sit", "position", "job", "private", "tree",
];
