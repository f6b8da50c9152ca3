//! Classifier artifact configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::model::DEFAULT_MODEL_FILE;

/// Environment variable overriding [`ModelConfig::path`].
pub const MODEL_PATH_ENV: &str = "ECONE_RISK_MODEL_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Artifact location. Relative paths resolve against the directory of
    /// the config file they were read from.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}
