//! Metric formulas
//!
//! All metrics are whole numbers, floored and clamped at zero. A word counts as five
//! characters, whatever was actually typed.

use crate::{AVERAGE_WORD_LENGTH, Seconds, minutes};

/// Words Per Minute
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wpm {
    /// Speed counting only correct characters
    pub raw: u32,
    /// Speed with every incorrect character taking one correct character back
    pub net: u32,
}

impl Wpm {
    /// Calculate Words Per Minute
    ///
    /// * `correct` - How many correct characters were typed during `elapsed`
    /// * `incorrect` - How many incorrect characters were typed during `elapsed`
    /// * `elapsed` - How many seconds have gone by. Zero yields zero speeds.
    ///
    pub fn calculate(correct: usize, incorrect: usize, elapsed: Seconds) -> Self {
        if elapsed == 0 {
            return Self::default();
        }

        let minutes = minutes(elapsed);
        let raw = correct as f64 / AVERAGE_WORD_LENGTH / minutes;
        let net = (correct as f64 - incorrect as f64) / AVERAGE_WORD_LENGTH / minutes;

        Self {
            raw: floor_clamped(raw),
            net: floor_clamped(net),
        }
    }
}

/// Typing accuracy
///
/// The share of correct characters among everything typed, skipped and added, as a whole
/// percentage between 0 and 100.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Accuracy(pub u32);

impl Accuracy {
    /// Calculate typing accuracy
    ///
    /// * `correct` - Correct characters
    /// * `total` - Correct, incorrect, missed and extra characters
    ///
    pub fn calculate(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }

        Self(floor_clamped(correct as f64 / total as f64 * 100.0))
    }
}

/// Typing consistency
///
/// Correct characters minus incorrect ones, as a whole percentage of everything typed,
/// skipped and added. Never negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Consistency(pub u32);

impl Consistency {
    /// Calculate typing consistency
    ///
    /// * `correct` - Correct characters
    /// * `incorrect` - Incorrect characters
    /// * `total` - Correct, incorrect, missed and extra characters
    ///
    pub fn calculate(correct: usize, incorrect: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }

        let score = (correct as f64 - incorrect as f64) / total as f64 * 100.0;
        Self(floor_clamped(score))
    }
}

fn floor_clamped(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm() {
        // 125 correct characters in 30 seconds: 25 words in half a minute
        let wpm = Wpm::calculate(125, 0, 30);
        assert_eq!(wpm, Wpm { raw: 50, net: 50 });

        let wpm = Wpm::calculate(125, 25, 30);
        assert_eq!(wpm, Wpm { raw: 50, net: 40 });
    }

    #[test]
    fn test_wpm_zero_elapsed() {
        assert_eq!(Wpm::calculate(100, 0, 0), Wpm::default());
    }

    #[test]
    fn test_wpm_floors() {
        // 12 chars / 5 = 2.4 words in one minute
        assert_eq!(Wpm::calculate(12, 0, 60).raw, 2);
    }

    #[test]
    fn test_net_wpm_never_negative() {
        let wpm = Wpm::calculate(5, 50, 60);
        assert_eq!(wpm.raw, 1);
        assert_eq!(wpm.net, 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(Accuracy::calculate(0, 0), Accuracy(0));
        assert_eq!(Accuracy::calculate(3, 4), Accuracy(75));
        assert_eq!(Accuracy::calculate(4, 4), Accuracy(100));
        assert_eq!(Accuracy::calculate(2, 3), Accuracy(66));
    }

    #[test]
    fn test_consistency() {
        assert_eq!(Consistency::calculate(0, 0, 0), Consistency(0));
        assert_eq!(Consistency::calculate(3, 1, 4), Consistency(50));
        assert_eq!(Consistency::calculate(1, 3, 4), Consistency(0));
    }
}
