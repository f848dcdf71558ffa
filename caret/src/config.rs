//! # Configuration Module - Session Policy Settings
//!
//! This module holds the knobs that shape how a session behaves around the keystroke rules:
//! how long a typist may stay idle, how many words a time-mode test is seeded with, and
//! which speed/accuracy thresholds a finished test has to meet to count.
//!
//! ## Usage
//!
//! ```rust
//! use caret::config::{Configuration, Thresholds};
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.afk_after_seconds, 5);
//!
//! // Require 60 wpm at 90% accuracy
//! let config = Configuration {
//!     thresholds: Thresholds {
//!         min_speed: Some(60),
//!         min_accuracy: Some(90),
//!     },
//!     ..Configuration::default()
//! };
//! ```

use crate::{FailureReason, Seconds};

/// Runtime configuration for a typing session
///
/// All durations are whole seconds, matching the one-second resolution of the session clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Idle seconds after which the typist is flagged as away-from-keyboard
    ///
    /// The flag is cleared by the next keystroke, but it is still recorded on the result.
    ///
    /// **Default**: 5 seconds
    pub afk_after_seconds: Seconds,

    /// Idle seconds after which a words-mode test fails
    ///
    /// **Default**: 30 seconds
    pub inactivity_limit_seconds: Seconds,

    /// Total seconds after which a words-mode test fails, regardless of activity
    ///
    /// **Default**: 300 seconds
    pub words_time_limit_seconds: Seconds,

    /// Words generated when a time-mode test starts, and again each time the caret reaches
    /// the last generated word
    ///
    /// **Default**: 50 words
    pub time_mode_batch: usize,

    /// Minimum speed and accuracy for a result to pass
    pub thresholds: Thresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            afk_after_seconds: 5,
            inactivity_limit_seconds: 30,
            words_time_limit_seconds: 300,
            time_mode_batch: 50,
            thresholds: Thresholds::default(),
        }
    }
}

/// Pass requirements for a finished session. `None` switches a requirement off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Minimum net wpm
    pub min_speed: Option<u32>,
    /// Minimum accuracy in percent
    pub min_accuracy: Option<u32>,
}

impl Thresholds {
    /// Check final metrics against the thresholds, speed first.
    pub const fn evaluate(&self, wpm: u32, accuracy: u32) -> Option<FailureReason> {
        if let Some(min) = self.min_speed
            && wpm < min
        {
            return Some(FailureReason::BelowMinSpeed);
        }

        if let Some(min) = self.min_accuracy
            && accuracy < min
        {
            return Some(FailureReason::BelowMinAccuracy);
        }

        None
    }
}
