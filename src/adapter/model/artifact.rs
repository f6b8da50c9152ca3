//! JSON model artifact: column preprocessing plus a linear estimator.
//!
//! ```json
//! {
//!   "preprocess": {
//!     "numeric": [{ "column": "areaDiff", "mean": 1.5, "scale": 2.0 }],
//!     "categorical": [{ "column": "soilType", "categories": ["CLAY", "LOAMY"] }]
//!   },
//!   "estimator": { "kind": "logistic_regression", "coefficients": [0.8, 0.1, -0.3], "intercept": -1.0 }
//! }
//! ```
//!
//! Encoding lays out the numeric columns first, then the one-hot block of
//! each categorical column. Unknown categories encode to all zeros.

use serde::Deserialize;

use crate::domain::FeatureRow;
use crate::error::ModelError;
use crate::port::ProbabilityModel;

/// Deserialized artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub preprocess: Preprocess,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Preprocess {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

/// Standardized numeric column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

/// One-hot encoded categorical column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
}

fn default_scale() -> f64 {
    1.0
}

/// Fitted estimator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// Binary logistic regression; predicts probabilities.
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
    /// Linear support vector classifier; decision function only.
    LinearSvc { coefficients: Vec<f64>, intercept: f64 },
}

impl Estimator {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::LinearSvc { .. } => "linear_svc",
        }
    }

    #[must_use]
    pub const fn predicts_proba(&self) -> bool {
        matches!(self, Estimator::LogisticRegression { .. })
    }
}

impl Preprocess {
    /// Number of columns produced by [`Preprocess::encode`].
    #[must_use]
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Encode a feature row into the estimator's input vector.
    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        let mut encoded = Vec::with_capacity(self.width());

        for spec in &self.numeric {
            let value = row
                .get(&spec.column)
                .ok_or_else(|| ModelError::UnknownColumn(spec.column.clone()))?
                .as_f64()
                .ok_or_else(|| ModelError::ColumnType {
                    column: spec.column.clone(),
                    expected: "numeric",
                })?;
            let scale = if spec.scale == 0.0 { 1.0 } else { spec.scale };
            encoded.push((value - spec.mean) / scale);
        }

        for spec in &self.categorical {
            let value = row
                .get(&spec.column)
                .ok_or_else(|| ModelError::UnknownColumn(spec.column.clone()))?;
            let category = value.as_category().ok_or_else(|| ModelError::ColumnType {
                column: spec.column.clone(),
                expected: "categorical",
            })?;
            encoded.extend(
                spec.categories
                    .iter()
                    .map(|c| if c == category { 1.0 } else { 0.0 }),
            );
        }

        Ok(encoded)
    }
}

/// Probability-capable model built from an artifact.
#[derive(Debug, Clone)]
pub struct LogisticPipeline {
    preprocess: Preprocess,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticPipeline {
    #[must_use]
    pub fn new(preprocess: Preprocess, coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            preprocess,
            coefficients,
            intercept,
        }
    }

    /// Build from an artifact whose estimator predicts probabilities.
    #[must_use]
    pub fn from_artifact(artifact: ModelArtifact) -> Option<Self> {
        match artifact.estimator {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => Some(Self::new(artifact.preprocess, coefficients, intercept)),
            Estimator::LinearSvc { .. } => None,
        }
    }
}

impl ProbabilityModel for LogisticPipeline {
    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        let x = self.preprocess.encode(row)?;
        if x.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: x.len(),
            });
        }

        let z = self
            .coefficients
            .iter()
            .zip(&x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        let p = sigmoid(z);
        Ok(vec![1.0 - p, p])
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> FeatureRow {
        FeatureRow::from_value(&json!({
            "land": { "landArea": 12.0, "soilType": "LOAMY" },
            "farmer": { "farmDetails": { "landAreaInAcres": 2.0 } },
        }))
    }

    fn preprocess() -> Preprocess {
        Preprocess {
            numeric: vec![NumericColumn {
                column: "areaDiff".into(),
                mean: 2.0,
                scale: 4.0,
            }],
            categorical: vec![CategoricalColumn {
                column: "soilType".into(),
                categories: vec!["CLAY".into(), "LOAMY".into()],
            }],
        }
    }

    #[test]
    fn encode_standardizes_then_one_hots() {
        let encoded = preprocess().encode(&row()).unwrap();
        assert_eq!(encoded, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_category_encodes_to_zeros() {
        let encoded = preprocess().encode(&FeatureRow::from_value(&json!({}))).unwrap();
        assert_eq!(encoded, vec![-0.5, 0.0, 0.0]);
    }

    #[test]
    fn zero_intercept_and_weights_give_even_odds() {
        let model = LogisticPipeline::new(preprocess(), vec![0.0, 0.0, 0.0], 0.0);
        let proba = model.predict_proba(&row()).unwrap();
        assert_eq!(proba, vec![0.5, 0.5]);
    }

    #[test]
    fn width_mismatch_is_reported() {
        let model = LogisticPipeline::new(preprocess(), vec![1.0], 0.0);
        let err = model.predict_proba(&row()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureCount {
                expected: 1,
                actual: 3
            }
        ));
        assert_eq!(
            err.to_string(),
            "X has 3 features, but the estimator is expecting 1 features"
        );
    }

    #[test]
    fn categorical_column_cannot_be_standardized() {
        let preprocess = Preprocess {
            numeric: vec![NumericColumn {
                column: "farmerState".into(),
                mean: 0.0,
                scale: 1.0,
            }],
            categorical: Vec::new(),
        };
        let err = preprocess.encode(&row()).unwrap_err();
        assert!(matches!(err, ModelError::ColumnType { expected: "numeric", .. }));
    }

    #[test]
    fn artifact_kind_decides_probability_capability() {
        let artifact: ModelArtifact = serde_json::from_value(json!({
            "estimator": { "kind": "linear_svc", "coefficients": [], "intercept": 0.0 },
        }))
        .unwrap();

        assert!(!artifact.estimator.predicts_proba());
        assert!(LogisticPipeline::from_artifact(artifact).is_none());
    }
}
