use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how results are kept
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// Save passed results of a signed-in user
    pub save_enabled: bool,
    /// Results shown on the history page
    pub history_limit: usize,
    pub directory: Option<PathBuf>,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            save_enabled: true,
            history_limit: 10,
            directory: None,
        }
    }
}
