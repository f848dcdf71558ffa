//! # caret - a keystroke-level typing-test engine
//!
//! `caret` drives a single typing test: it holds the words to type, grades every
//! keystroke against them, tracks the caret across word boundaries, samples live
//! speed once per second and produces a final [`SessionResult`].
//!
//! The engine is synchronous and single-threaded. A shell feeds it classified key
//! events through [`SessionController::handle_key_event`] and calls
//! [`SessionController::tick`] once per second after the test has started.
//!
//! ```rust
//! use caret::{KeyInput, Mode, SessionController, WordList};
//!
//! let words = WordList::new("demo", ["hello", "world"]);
//! let mut controller = SessionController::new(words, Mode::words(2)).unwrap();
//!
//! for key in "hello world".chars() {
//!     controller.handle_key_event(KeyInput::from(key));
//! }
//!
//! assert!(controller.session().is_ended());
//! let result = controller.finalize().unwrap();
//! assert_eq!(result.counters.correct_word, 2);
//! ```

pub mod activity;
pub mod clock;
pub mod config;
pub mod controller;
pub mod grid;
pub mod input;
pub mod math;
pub mod mode;
pub mod persistence;
pub mod render;
pub mod result;
pub mod session;
pub mod statistics;
pub mod words;

pub use config::{Configuration, Thresholds};
pub use controller::{Persistence, SessionController, SessionObserver, SkipReason};
pub use grid::{Caret, CaretMark, CharStatus, Character, CharacterGrid, Word};
pub use input::{InputReducer, KeyInput, Keystroke};
pub use mode::{Mode, ModeKind};
pub use persistence::{IdentityProvider, PersistenceError, ResultStore, UserId};
pub use result::{FailureReason, Outcome, SessionResult};
pub use session::{Ending, Lifecycle, Session};
pub use statistics::{Counters, MetricSample, TimeSeries};
pub use words::{Fallback, GenerationError, WordList, WordSource};

const AVERAGE_WORD_LENGTH: f64 = 5.0;

/// Whole seconds, the resolution of the session clock
pub type Seconds = u32;

// Get the minutes elapsed from whole seconds
pub(crate) fn minutes(seconds: Seconds) -> f64 {
    f64::from(seconds) / 60.0
}
