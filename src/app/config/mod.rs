//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for deployment-specific values (`ECONE_RISK_BIND`,
//! `ECONE_RISK_MODEL_PATH`). Every section is optional.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

mod logging;
mod model;
mod server;

pub use logging::{LoggingConfig, LOG_FORMATS};
pub use model::{ModelConfig, MODEL_PATH_ENV};
pub use server::{ServerConfig, BIND_ENV};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load from `path`, reading overrides through `env` instead of the
    /// process environment.
    #[allow(clippy::result_large_err)]
    pub fn load_with<P, F>(path: P, env: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            content: content.clone(),
            source,
        })?;

        if config.model.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.model.path = dir.join(&config.model.path);
            }
        }

        config.apply_env(env);
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus environment overrides, for runs without a config file.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults plus overrides read through `env`.
    #[allow(clippy::result_large_err)]
    pub fn from_env_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = env(BIND_ENV) {
            self.server.bind = bind;
        }
        if let Some(path) = env(MODEL_PATH_ENV) {
            self.model.path = path.into();
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "model.path" }.into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!(
                    "expected one of {}, got '{}'",
                    LOG_FORMATS.join(", "),
                    self.logging.format
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Parsed listen address.
    #[allow(clippy::result_large_err)]
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        if self.server.bind.is_empty() {
            return Err(ConfigError::MissingField {
                field: "server.bind",
            }
            .into());
        }

        self.server.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "server.bind",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
