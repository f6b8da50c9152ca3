use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        /// Raw file contents, kept for span-labelled diagnostics.
        content: String,
        source: toml::de::Error,
    },
}

/// Classifier artifact and inference errors.
///
/// Load-time variants never reach a scoring caller: the loader degrades them
/// into an unavailable model handle. Inference-time variants are folded into
/// an `ERROR` risk result by the scorer.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("X has {actual} features, but the estimator is expecting {expected} features")]
    FeatureCount { expected: usize, actual: usize },

    #[error("unknown feature column '{0}'")]
    UnknownColumn(String),

    #[error("column '{column}' is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("expected probabilities for {expected} classes, got {actual}")]
    ClassCount { expected: usize, actual: usize },

    #[error("invalid probability {0}")]
    InvalidProbability(f64),

    #[error("classifier panicked: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;
