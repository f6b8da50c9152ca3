//! Classifier artifact loading.
//!
//! The artifact is read once at startup. Loading never fails the process:
//! a missing or unreadable artifact yields [`ModelHandle::Unavailable`], and
//! an artifact without probability prediction yields
//! [`ModelHandle::Malformed`].

mod artifact;

use std::path::Path;

use tracing::{error, info, warn};

use crate::error::ModelError;
use crate::port::ModelHandle;

pub use artifact::{
    CategoricalColumn, Estimator, LogisticPipeline, ModelArtifact, NumericColumn, Preprocess,
};

/// Conventional artifact file name.
pub const DEFAULT_MODEL_FILE: &str = "risk_model.json";

/// Load the classifier at `path`, degrading instead of failing.
#[must_use]
pub fn load_model(path: &Path) -> ModelHandle {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "Model file not found; risk scoring is disabled"
        );
        return ModelHandle::Unavailable;
    }

    let artifact = match read_artifact(path) {
        Ok(artifact) => artifact,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load model");
            return ModelHandle::Unavailable;
        }
    };

    let kind = artifact.estimator.kind();
    match LogisticPipeline::from_artifact(artifact) {
        Some(model) => {
            info!(path = %path.display(), estimator = kind, "Model loaded");
            ModelHandle::ready(model)
        }
        None => {
            error!(
                path = %path.display(),
                estimator = kind,
                "Loaded estimator does not predict probabilities"
            );
            ModelHandle::Malformed {
                reason: format!("estimator '{kind}' has no probability prediction"),
            }
        }
    }
}

/// Read and parse an artifact without interpreting it.
pub fn read_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
