//! Stub classifiers.

use std::sync::Mutex;

use crate::domain::FeatureRow;
use crate::error::ModelError;
use crate::port::{ModelHandle, ProbabilityModel};

/// Returns the same distribution for every row.
#[derive(Debug, Clone)]
pub struct FixedModel {
    proba: Vec<f64>,
}

impl FixedModel {
    /// Two-class model with `p` for the suspicious class.
    #[must_use]
    pub fn suspicious(p: f64) -> Self {
        Self::new(vec![1.0 - p, p])
    }

    #[must_use]
    pub fn new(proba: Vec<f64>) -> Self {
        Self { proba }
    }

    #[must_use]
    pub fn handle(self) -> ModelHandle {
        ModelHandle::ready(self)
    }
}

impl ProbabilityModel for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        Ok(self.proba.clone())
    }
}

/// Fails every prediction with a feature-count mismatch.
#[derive(Debug, Clone, Copy)]
pub struct FailingModel {
    pub expected: usize,
}

impl ProbabilityModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::FeatureCount {
            expected: self.expected,
            actual: row.values().len(),
        })
    }
}

/// Records every row it is asked to score.
#[derive(Debug, Default)]
pub struct RecordingModel {
    rows: Mutex<Vec<FeatureRow>>,
}

impl RecordingModel {
    /// Rows seen so far.
    #[must_use]
    pub fn rows(&self) -> Vec<FeatureRow> {
        match self.rows.lock() {
            Ok(rows) => rows.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProbabilityModel for RecordingModel {
    fn name(&self) -> &str {
        "recording"
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        match self.rows.lock() {
            Ok(mut rows) => rows.push(row.clone()),
            Err(poisoned) => poisoned.into_inner().push(row.clone()),
        }
        Ok(vec![0.5, 0.5])
    }
}

/// Panics on every prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingModel;

impl ProbabilityModel for PanickingModel {
    fn name(&self) -> &str {
        "panicking"
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        panic!("weights not initialised")
    }
}
