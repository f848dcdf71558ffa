use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use caret::{Configuration, UserId, WordList};
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use policy::{ActivitySettings, ThresholdSettings};
pub use results::ResultsConfig;
pub use source::SourceError;
pub use test::{TestMode, TestSettings};

pub mod policy;
pub mod results;
pub mod source;
pub mod theme;

const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "ZONETYPE_";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub test: TestSettings,
    pub thresholds: ThresholdSettings,
    pub activity: ActivitySettings,
    /// Local profile that results are saved under. Nothing is saved without one.
    pub user: Option<String>,
    /// Word list to type from, by file name
    pub word_list: Option<String>,
    pub results: ResultsConfig,
    pub word_lists_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub theme: theme::Theme,
}

impl Settings {
    pub const fn configuration(&self) -> Configuration {
        policy::configuration(&self.activity, &self.thresholds)
    }

    /// The signed-in user, if saving is enabled
    pub fn identity(&self) -> Option<UserId> {
        self.user
            .as_deref()
            .map(str::trim)
            .filter(|user| self.results.save_enabled && !user.is_empty())
            .map(UserId::new)
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to write default settings: {0}")]
    #[from(skip)]
    WriteDefaults(std::io::Error),

    #[error("Failed to serialize default settings: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to load word lists: {0}")]
    Sources(SourceError),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub word_lists: BTreeMap<String, WordList>,
    pub config_dir: PathBuf,
    pub results_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("com", "ZoneType", "ZoneType");

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| dirs.as_ref().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join(SETTINGS_FILE);
        if !settings_toml.exists() {
            write_defaults(&settings_toml)?;
        }

        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(&settings_toml))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
            .extract()
            .map_err(Box::new)?;

        // Data lives next to the config unless the platform has a dedicated place for it
        let data_dir = dirs
            .as_ref()
            .map_or_else(|| config_dir.clone(), |dirs| dirs.data_dir().to_path_buf());

        let word_lists_dir = settings
            .word_lists_dir
            .clone()
            .unwrap_or_else(|| config_dir.join("wordlists"));
        let word_lists = source::get_word_lists(&word_lists_dir)?;

        let results_dir = settings
            .results
            .directory
            .clone()
            .unwrap_or_else(|| data_dir.join("results"));

        let log_dir = settings
            .log_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("logs"));

        Ok(Self {
            settings,
            word_lists,
            config_dir,
            results_dir,
            log_dir,
        })
    }
}

fn write_defaults(path: &Path) -> Result<(), ConfigError> {
    let defaults = toml::to_string_pretty(&Settings::default())?;
    std::fs::write(path, defaults).map_err(ConfigError::WriteDefaults)
}
