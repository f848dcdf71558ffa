use caret::{Configuration, Seconds, Thresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// The requirement is ignored
    #[default]
    Off,
    /// Tests below `value` fail and are not saved
    Custom,
}

/// A single pass requirement that can be switched on and off
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Threshold {
    pub mode: ThresholdMode,
    pub value: u32,
}

impl Threshold {
    const fn off(value: u32) -> Self {
        Self {
            mode: ThresholdMode::Off,
            value,
        }
    }

    pub const fn get(&self) -> Option<u32> {
        match self.mode {
            ThresholdMode::Off => None,
            ThresholdMode::Custom => Some(self.value),
        }
    }
}

/// Pass requirements for a finished test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdSettings {
    /// Net wpm
    pub speed: Threshold,
    /// Percent
    pub accuracy: Threshold,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            speed: Threshold::off(100),
            accuracy: Threshold::off(75),
        }
    }
}

impl ThresholdSettings {
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_speed: self.speed.get(),
            min_accuracy: self.accuracy.get(),
        }
    }
}

/// Idle detection and the words-mode limits, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivitySettings {
    pub afk_after: Seconds,
    pub inactivity_limit: Seconds,
    pub words_time_limit: Seconds,
    /// Words generated at a time in time mode
    pub time_mode_batch: usize,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        let defaults = Configuration::default();
        Self {
            afk_after: defaults.afk_after_seconds,
            inactivity_limit: defaults.inactivity_limit_seconds,
            words_time_limit: defaults.words_time_limit_seconds,
            time_mode_batch: defaults.time_mode_batch,
        }
    }
}

/// Build the engine configuration from the settings sections
pub const fn configuration(activity: &ActivitySettings, thresholds: &ThresholdSettings) -> Configuration {
    Configuration {
        afk_after_seconds: activity.afk_after,
        inactivity_limit_seconds: activity.inactivity_limit,
        words_time_limit_seconds: activity.words_time_limit,
        time_mode_batch: activity.time_mode_batch,
        thresholds: thresholds.thresholds(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn custom(value: u32) -> Threshold {
        Threshold {
            mode: ThresholdMode::Custom,
            value,
        }
    }

    #[test]
    fn test_thresholds_off_by_default() {
        let thresholds = ThresholdSettings::default().thresholds();
        assert_eq!(thresholds, Thresholds::default());
    }

    #[test]
    fn test_custom_thresholds() {
        let settings = ThresholdSettings {
            speed: custom(100),
            accuracy: custom(75),
        };
        assert_eq!(
            settings.thresholds(),
            Thresholds {
                min_speed: Some(100),
                min_accuracy: Some(75)
            }
        );
    }

    #[test]
    fn test_accuracy_threshold_alone() {
        let settings = ThresholdSettings {
            accuracy: custom(90),
            ..ThresholdSettings::default()
        };
        assert_eq!(
            settings.thresholds(),
            Thresholds {
                min_speed: None,
                min_accuracy: Some(90)
            }
        );
    }

    #[test]
    fn test_default_configuration_matches_engine() {
        let config = configuration(&ActivitySettings::default(), &ThresholdSettings::default());
        assert_eq!(config, Configuration::default());
    }
}
