use std::{
    collections::BTreeMap,
    fmt::Display,
    path::{Path, PathBuf},
    time::Duration,
};

use caret::{
    Counters, MetricSample, Mode, PersistenceError, ResultStore, Seconds, SessionResult, UserId,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::SystemTime;

use crate::config::TestMode;

#[derive(Debug, From, Error)]
pub enum StoreError {
    #[error("Failed to read results directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to access result: {0}")]
    Io(std::io::Error),

    #[error("Failed to encode result: {0}")]
    Json(serde_json::Error),
}

impl From<StoreError> for PersistenceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Io(error) | StoreError::ReadDirectory { error, .. } => Self::Io(error),
            StoreError::Json(error) => Self::Encode(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredSample {
    pub elapsed: Seconds,
    pub raw_wpm: u32,
    pub net_wpm: u32,
}

impl From<&MetricSample> for StoredSample {
    fn from(value: &MetricSample) -> Self {
        Self {
            elapsed: value.elapsed,
            raw_wpm: value.raw_wpm,
            net_wpm: value.net_wpm,
        }
    }
}

/// A saved result, as written to disk
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredResult {
    pub user: String,
    pub mode: TestMode,
    /// Seconds in time mode, words in words mode
    pub parameter: usize,
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
    pub elapsed: Seconds,
    pub afk: bool,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub missed_chars: usize,
    pub extra_chars: usize,
    pub correct_words: usize,
    pub completed_words: usize,
    pub samples: Vec<StoredSample>,
    /// Milliseconds since the unix epoch
    pub completed_at: u64,
}

impl StoredResult {
    pub fn new(result: &SessionResult, user: &UserId) -> Self {
        let Counters {
            correct_char,
            incorrect_char,
            missed_char,
            extra_char,
            correct_word,
            completed_words,
        } = result.counters;

        Self {
            user: user.to_string(),
            mode: TestMode::of(result.mode),
            parameter: result.mode.parameter(),
            wpm: result.wpm,
            raw_wpm: result.raw_wpm,
            accuracy: result.accuracy,
            consistency: result.consistency,
            elapsed: result.elapsed,
            afk: result.afk,
            correct_chars: correct_char,
            incorrect_chars: incorrect_char,
            missed_chars: missed_char,
            extra_chars: extra_char,
            correct_words: correct_word,
            completed_words,
            samples: result.samples.iter().map(StoredSample::from).collect(),
            completed_at: unix_millis(result.completed_at),
        }
    }

    pub const fn key(&self) -> (TestMode, usize) {
        (self.mode, self.parameter)
    }

    /// Faster wins, accuracy breaks ties
    pub fn beats(&self, other: &Self) -> bool {
        (self.wpm, self.accuracy) > (other.wpm, other.accuracy)
    }
}

impl Display for StoredResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<4} {:>4} wpm  {:>3}% acc  raw {:>4}  consistency {:>3}%",
            self.mode, self.parameter, self.wpm, self.accuracy, self.raw_wpm, self.consistency
        )?;
        if self.afk {
            f.write_str("  (afk)")?;
        }
        Ok(())
    }
}

fn unix_millis(time: SystemTime) -> u64 {
    let since_epoch = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)
}

/// Keeps one JSON file per result, in a directory per user
#[derive(Debug, Clone)]
pub struct FileResultStore {
    directory: PathBuf,
}

impl FileResultStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        let name: String = user
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.directory.join(name)
    }

    pub fn write(&self, record: &StoredResult, user: &UserId) -> Result<PathBuf, StoreError> {
        let dir = self.user_dir(user);
        std::fs::create_dir_all(&dir)?;

        let mut path = dir.join(format!("result_{}.json", record.completed_at));
        let mut suffix = 1;
        while path.exists() {
            path = dir.join(format!("result_{}_{suffix}.json", record.completed_at));
            suffix += 1;
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, json)?;
        tracing::info!(path = %path.display(), "saved result");
        Ok(path)
    }

    /// All results of `user`, newest first. Unreadable files are skipped.
    pub fn load(&self, user: &UserId) -> Result<Vec<StoredResult>, StoreError> {
        let dir = self.user_dir(user);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = dir.read_dir().map_err(|error| StoreError::ReadDirectory {
            directory: dir.clone(),
            error,
        })?;

        let mut results = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            match read_record(&path) {
                Ok(record) => results.push(record),
                Err(error) => tracing::warn!(path = %path.display(), %error, "skipping result"),
            }
        }

        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(results)
    }

    /// The best saved result of `user` for one mode and parameter
    pub fn best_for(&self, user: &UserId, mode: Mode) -> Result<Option<StoredResult>, StoreError> {
        let key = (TestMode::of(mode), mode.parameter());
        Ok(personal_bests(&self.load(user)?).remove(&key))
    }
}

impl ResultStore for FileResultStore {
    fn save(&mut self, result: &SessionResult, user: &UserId) -> Result<(), PersistenceError> {
        let record = StoredResult::new(result, user);
        self.write(&record, user)?;
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<StoredResult, StoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// The best result for every mode and parameter
pub fn personal_bests(results: &[StoredResult]) -> BTreeMap<(TestMode, usize), StoredResult> {
    let mut bests: BTreeMap<(TestMode, usize), StoredResult> = BTreeMap::new();
    for result in results {
        let is_best = bests
            .get(&result.key())
            .is_none_or(|best| result.beats(best));
        if is_best {
            bests.insert(result.key(), result.clone());
        }
    }
    bests
}

/// Results counted by the "last 10" averages
pub const RECENT_WINDOW: usize = 10;

/// The highest value of one metric, with the test it was set in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highest {
    pub value: u32,
    pub mode: TestMode,
    pub parameter: usize,
}

impl Highest {
    /// The newest result wins ties
    fn of(results: &[StoredResult], metric: impl Fn(&StoredResult) -> u32) -> Option<Self> {
        results
            .iter()
            .fold(None, |highest: Option<&StoredResult>, result| match highest {
                Some(highest) if metric(highest) >= metric(result) => Some(highest),
                _ => Some(result),
            })
            .map(|result| Self {
                value: metric(result),
                mode: result.mode,
                parameter: result.parameter,
            })
    }
}

/// Rounded means of the headline metrics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
}

impl Averages {
    fn of(results: &[StoredResult]) -> Self {
        let mean = |metric: fn(&StoredResult) -> u32| {
            let count = results.len() as u64;
            if count == 0 {
                return 0;
            }
            let total: u64 = results.iter().map(|result| u64::from(metric(result))).sum();
            u32::try_from((total + count / 2) / count).unwrap_or(u32::MAX)
        };

        Self {
            wpm: mean(|result| result.wpm),
            raw_wpm: mean(|result| result.raw_wpm),
            accuracy: mean(|result| result.accuracy),
            consistency: mean(|result| result.consistency),
        }
    }
}

/// Account overview over every saved result of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub tests_completed: usize,
    /// Seconds spent in saved tests
    pub time_typing: u64,
    pub highest_wpm: Highest,
    pub highest_raw_wpm: Highest,
    pub highest_accuracy: Highest,
    pub highest_consistency: Highest,
    pub all_time: Averages,
    /// Averages of the [RECENT_WINDOW] newest results
    pub recent: Averages,
}

/// Summarize `results`, ordered newest first. `None` if there are no results.
pub fn summary(results: &[StoredResult]) -> Option<Summary> {
    Some(Summary {
        tests_completed: results.len(),
        time_typing: results.iter().map(|result| u64::from(result.elapsed)).sum(),
        highest_wpm: Highest::of(results, |result| result.wpm)?,
        highest_raw_wpm: Highest::of(results, |result| result.raw_wpm)?,
        highest_accuracy: Highest::of(results, |result| result.accuracy)?,
        highest_consistency: Highest::of(results, |result| result.consistency)?,
        all_time: Averages::of(results),
        recent: Averages::of(&results[..results.len().min(RECENT_WINDOW)]),
    })
}

impl Display for Highest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.value, self.mode, self.parameter)
    }
}

impl Display for Averages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} wpm  raw {}  {}% acc  consistency {}%",
            self.wpm, self.raw_wpm, self.accuracy, self.consistency
        )
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let time = self.time_typing;
        writeln!(f, "Tests completed     : {}", self.tests_completed)?;
        writeln!(
            f,
            "Time typing         : {:0>2}:{:0>2}:{:0>2}",
            time / 3600,
            time / 60 % 60,
            time % 60
        )?;
        writeln!(f, "Highest wpm         : {}", self.highest_wpm)?;
        writeln!(f, "Highest raw         : {}", self.highest_raw_wpm)?;
        writeln!(f, "Highest accuracy    : {}", self.highest_accuracy)?;
        writeln!(f, "Highest consistency : {}", self.highest_consistency)?;
        writeln!(f, "Average             : {}", self.all_time)?;
        write!(f, "Last {RECENT_WINDOW:<2} average     : {}", self.recent)
    }
}
