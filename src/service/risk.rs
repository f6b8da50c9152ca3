//! Risk scoring service.
//!
//! Turns a payload into a [`RiskResult`] through the classifier held in a
//! [`ModelHandle`]. Scoring never fails: every outcome is a well-formed
//! result.
//!
//! ```text
//! START ─┬─ no model ──────────────────────────────────────► UNKNOWN + "Model not loaded"
//!        └─ build features ─┬─ no probability capability ──► ERROR (no message)
//!                           └─ predict ─┬─ failure/panic ──► ERROR + message
//!                                       └─ classify ───────► LOW | MEDIUM | HIGH
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{build_feature_row, FeatureRow, RiskPayload, RiskResult};
use crate::error::ModelError;
use crate::port::{ModelHandle, ModelStatus, ProbabilityModel};

/// Index of the suspicious class in the classifier output.
const SUSPICIOUS_CLASS: usize = 1;

/// Number of classes the classifier must produce.
const CLASS_COUNT: usize = 2;

/// Scores payloads against a classifier loaded once at startup.
///
/// Holds no mutable state, so one instance can be shared across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    model: ModelHandle,
}

impl RiskScorer {
    #[must_use]
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    /// Scorer with no classifier; every request reports `UNKNOWN`.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(ModelHandle::Unavailable)
    }

    #[must_use]
    pub fn status(&self) -> ModelStatus {
        self.model.status()
    }

    /// Score untrusted JSON.
    #[must_use]
    pub fn predict_risk(&self, payload: &Value) -> RiskResult {
        if matches!(self.model, ModelHandle::Unavailable) {
            return RiskResult::unavailable();
        }
        self.score(&RiskPayload::from_value(payload))
    }

    /// Score an already-parsed payload.
    #[must_use]
    pub fn score(&self, payload: &RiskPayload) -> RiskResult {
        if matches!(self.model, ModelHandle::Unavailable) {
            return RiskResult::unavailable();
        }

        let row = build_feature_row(payload);
        debug!(row = ?row, "Features built");

        let model = match &self.model {
            ModelHandle::Ready(model) => model,
            ModelHandle::Malformed { reason } => {
                error!(reason = %reason, "Loaded model cannot predict probabilities");
                return RiskResult::malformed();
            }
            ModelHandle::Unavailable => return RiskResult::unavailable(),
        };

        match suspicious_probability(model.as_ref(), &row) {
            Ok(probability) => RiskResult::scored(probability),
            Err(e) => {
                error!(model = model.name(), error = %e, row = ?row, "Error during risk prediction");
                RiskResult::failed(e.to_string())
            }
        }
    }
}

fn suspicious_probability(
    model: &dyn ProbabilityModel,
    row: &FeatureRow,
) -> Result<f64, ModelError> {
    let proba = panic::catch_unwind(AssertUnwindSafe(|| model.predict_proba(row)))
        .map_err(|payload| ModelError::Panicked(panic_message(payload.as_ref())))??;
    if proba.len() != CLASS_COUNT {
        return Err(ModelError::ClassCount {
            expected: CLASS_COUNT,
            actual: proba.len(),
        });
    }

    let p = proba[SUSPICIOUS_CLASS];
    if !(0.0..=1.0).contains(&p) {
        return Err(ModelError::InvalidProbability(p));
    }
    Ok(p)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use serde_json::json;

    struct Fixed(Vec<f64>);

    impl ProbabilityModel for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
            Ok(self.0.clone())
        }
    }

    fn scorer(proba: Vec<f64>) -> RiskScorer {
        RiskScorer::new(ModelHandle::ready(Fixed(proba)))
    }

    #[test]
    fn scores_suspicious_class() {
        let result = scorer(vec![0.9, 0.1]).predict_risk(&json!({}));
        assert_eq!(result, RiskResult::scored(0.1));
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn unavailable_model_ignores_payload() {
        let scorer = RiskScorer::unavailable();
        for payload in [json!({}), json!("junk"), json!({"land": {"landArea": 5}})] {
            assert_eq!(scorer.predict_risk(&payload), RiskResult::unavailable());
        }
    }

    #[test]
    fn malformed_model_reports_error_without_message() {
        let scorer = RiskScorer::new(ModelHandle::Malformed {
            reason: "no predict_proba".into(),
        });
        let result = scorer.predict_risk(&json!({}));

        assert_eq!(result.risk_level, RiskLevel::Error);
        assert_eq!(result.risk_score, -1.0);
        assert!(result.error.is_none());
    }

    #[test]
    fn wrong_class_count_is_a_prediction_failure() {
        let result = scorer(vec![1.0]).predict_risk(&json!({}));

        assert_eq!(result.risk_level, RiskLevel::Error);
        assert_eq!(
            result.error.as_deref(),
            Some("expected probabilities for 2 classes, got 1")
        );
    }

    #[test]
    fn out_of_range_probability_is_a_prediction_failure() {
        for p in [f64::NAN, 1.5, -0.1] {
            let result = scorer(vec![0.0, p]).predict_risk(&json!({}));
            assert_eq!(result.risk_level, RiskLevel::Error);
            assert!(result.error.is_some());
        }
    }
}
