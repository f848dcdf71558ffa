//! Session counters and the per-second metric series

use crate::{
    Seconds,
    math::{Accuracy, Consistency, Wpm},
};

/// Cumulative keystroke counters of a session. They only ever grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Counters {
    pub correct_char: usize,
    pub incorrect_char: usize,
    /// Characters skipped by committing a word early
    pub missed_char: usize,
    /// Characters typed past the end of a word
    pub extra_char: usize,
    /// Words committed exactly as generated
    pub correct_word: usize,
    /// Words committed, correct or not
    pub completed_words: usize,
}

impl Counters {
    /// Correct, incorrect, missed and extra characters
    pub const fn total_chars(&self) -> usize {
        self.correct_char + self.incorrect_char + self.missed_char + self.extra_char
    }

    pub fn wpm(&self, elapsed: Seconds) -> Wpm {
        Wpm::calculate(self.correct_char, self.incorrect_char, elapsed)
    }

    pub fn accuracy(&self) -> Accuracy {
        Accuracy::calculate(self.correct_char, self.total_chars())
    }

    pub fn consistency(&self) -> Consistency {
        Consistency::calculate(self.correct_char, self.incorrect_char, self.total_chars())
    }
}

/// Speeds measured at the end of one clock second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricSample {
    pub elapsed: Seconds,
    pub raw_wpm: u32,
    pub net_wpm: u32,
}

impl MetricSample {
    pub fn measure(elapsed: Seconds, counters: &Counters) -> Self {
        let wpm = counters.wpm(elapsed);
        Self {
            elapsed,
            raw_wpm: wpm.raw,
            net_wpm: wpm.net,
        }
    }
}

/// Metric samples in clock order, at most one per second
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeSeries {
    samples: Vec<MetricSample>,
}

impl TimeSeries {
    /// Record a sample, replacing the sample already taken for the same second
    pub fn record(&mut self, sample: MetricSample) {
        if let Some(existing) = self
            .samples
            .iter_mut()
            .rev()
            .find(|existing| existing.elapsed == sample.elapsed)
        {
            *existing = sample;
        } else {
            self.samples.push(sample);
        }
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The highest raw or net speed in the series
    pub fn peak(&self) -> u32 {
        self.samples
            .iter()
            .map(|sample| sample.raw_wpm.max(sample.net_wpm))
            .max()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl From<TimeSeries> for Vec<MetricSample> {
    fn from(series: TimeSeries) -> Self {
        series.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(elapsed: Seconds, raw_wpm: u32) -> MetricSample {
        MetricSample {
            elapsed,
            raw_wpm,
            net_wpm: raw_wpm,
        }
    }

    #[test]
    fn test_counters_metrics() {
        let counters = Counters {
            correct_char: 6,
            incorrect_char: 2,
            missed_char: 0,
            extra_char: 0,
            correct_word: 1,
            completed_words: 2,
        };

        assert_eq!(counters.total_chars(), 8);
        assert_eq!(counters.accuracy(), Accuracy(75));
        assert_eq!(counters.consistency(), Consistency(50));
    }

    #[test]
    fn test_record_replaces_same_second() {
        let mut series = TimeSeries::default();
        series.record(sample(1, 10));
        series.record(sample(2, 20));
        series.record(sample(2, 30));

        assert_eq!(series.len(), 2);
        assert_eq!(series.last(), Some(&sample(2, 30)));
        assert_eq!(series.peak(), 30);
    }

    #[test]
    fn test_measure_uses_counters() {
        let counters = Counters {
            correct_char: 10,
            ..Counters::default()
        };
        let measured = MetricSample::measure(6, &counters);

        assert_eq!(measured.elapsed, 6);
        assert_eq!(measured.raw_wpm, counters.wpm(6).raw);
    }
}
