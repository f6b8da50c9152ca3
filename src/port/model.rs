//! Classifier port.
//!
//! The scorer depends on one capability of the trained model: probability
//! prediction over a single feature row. Whether a loaded artifact offers
//! that capability is settled once, when the [`ModelHandle`] is built, rather
//! than probed on every request.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::FeatureRow;
use crate::error::ModelError;

/// Binary classifier exposing per-class probabilities.
///
/// Index 0 of the output is the not-suspicious class, index 1 the
/// suspicious class.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); one instance is
///   shared read-only by every request
/// - `predict_proba` must not mutate the model
pub trait ProbabilityModel: Send + Sync {
    /// Model name for logging.
    fn name(&self) -> &str;

    /// Per-class probabilities for one row.
    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError>;
}

/// Process-wide classifier state, fixed at startup.
#[derive(Clone)]
pub enum ModelHandle {
    /// Ready to score.
    Ready(Arc<dyn ProbabilityModel>),
    /// No artifact, or the artifact could not be loaded.
    Unavailable,
    /// The artifact loaded but cannot predict probabilities.
    Malformed { reason: String },
}

impl ModelHandle {
    /// Wrap a concrete model.
    pub fn ready(model: impl ProbabilityModel + 'static) -> Self {
        Self::Ready(Arc::new(model))
    }

    #[must_use]
    pub fn status(&self) -> ModelStatus {
        match self {
            Self::Ready(_) => ModelStatus::Ready,
            Self::Unavailable => ModelStatus::Unavailable,
            Self::Malformed { .. } => ModelStatus::Malformed,
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(model) => f.debug_tuple("Ready").field(&model.name()).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
            Self::Malformed { reason } => {
                f.debug_struct("Malformed").field("reason", reason).finish()
            }
        }
    }
}

/// Coarse model state for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Ready,
    Unavailable,
    Malformed,
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "ready",
            Self::Unavailable => "unavailable",
            Self::Malformed => "malformed",
        };
        f.write_str(s)
    }
}
