//! Risk levels and the scoring response.
//!
//! # Levels
//!
//! The probability of the suspicious class is bucketed into closed-open
//! bands:
//!
//! | Probability      | Level    |
//! |------------------|----------|
//! | `p < 0.3`        | `LOW`    |
//! | `0.3 <= p < 0.6` | `MEDIUM` |
//! | `p >= 0.6`       | `HIGH`   |
//!
//! Classification uses the raw probability. The reported score is rounded
//! to three decimals afterwards, so `0.2996` reports `0.3` but stays `LOW`.
//!
//! # Examples
//!
//! ```
//! use econe_risk::domain::{RiskLevel, RiskResult};
//!
//! let result = RiskResult::scored(0.2996);
//! assert_eq!(result.risk_level, RiskLevel::Low);
//! assert_eq!(result.risk_score, 0.3);
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Version tag reported with every result.
pub const MODEL_VERSION: &str = "v1";

/// Score reported when no probability could be computed.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Lower bound of the `MEDIUM` band.
pub const MEDIUM_THRESHOLD: f64 = 0.3;

/// Lower bound of the `HIGH` band.
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Decimal places of the reported score.
pub const SCORE_DECIMALS: u32 = 3;

/// Error text for the unavailable-model path.
pub const MODEL_NOT_LOADED: &str = "Model not loaded";

/// Discretized risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// No classifier is loaded.
    Unknown,
    /// The classifier is malformed or prediction failed.
    Error,
}

impl RiskLevel {
    /// Bucket a suspicious-class probability.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < MEDIUM_THRESHOLD {
            RiskLevel::Low
        } else if probability < HIGH_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Unknown => "UNKNOWN",
            RiskLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring response.
///
/// `error` is present only on the unavailable-model and prediction-failure
/// paths; a malformed model reports `ERROR` without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RiskResult {
    /// Successful result: classify on the raw probability, then round.
    #[must_use]
    pub fn scored(probability: f64) -> Self {
        let risk_level = RiskLevel::from_probability(probability);
        Self {
            risk_score: round_score(probability),
            risk_level,
            model_version: MODEL_VERSION.to_string(),
            error: None,
        }
    }

    /// No classifier loaded.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::degraded(RiskLevel::Unknown, Some(MODEL_NOT_LOADED.to_string()))
    }

    /// Classifier loaded without probability prediction.
    #[must_use]
    pub fn malformed() -> Self {
        Self::degraded(RiskLevel::Error, None)
    }

    /// Prediction failed with the given message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::degraded(RiskLevel::Error, Some(message.into()))
    }

    fn degraded(risk_level: RiskLevel, error: Option<String>) -> Self {
        Self {
            risk_score: SENTINEL_SCORE,
            risk_level,
            model_version: MODEL_VERSION.to_string(),
            error,
        }
    }

    /// Whether the score came from the classifier.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(
            self.risk_level,
            RiskLevel::Low | RiskLevel::Medium | RiskLevel::High
        )
    }
}

/// Round a probability to [`SCORE_DECIMALS`] places, half to even on the
/// exact binary value.
#[must_use]
pub fn round_score(probability: f64) -> f64 {
    Decimal::from_f64_retain(probability)
        .map(|d| d.round_dp_with_strategy(SCORE_DECIMALS, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_lower_bounds_are_inclusive() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.2999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.5999), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::High);
    }

    #[test]
    fn classification_precedes_rounding() {
        let result = RiskResult::scored(0.2996);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.risk_score, 0.3);

        let result = RiskResult::scored(0.59999);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.risk_score, 0.6);
    }

    #[test]
    fn rounding_uses_three_decimals() {
        assert_eq!(round_score(0.1), 0.1);
        assert_eq!(round_score(0.12345), 0.123);
        assert_eq!(round_score(0.9876), 0.988);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn degraded_results_carry_sentinel_score() {
        let unavailable = RiskResult::unavailable();
        assert_eq!(unavailable.risk_score, -1.0);
        assert_eq!(unavailable.risk_level, RiskLevel::Unknown);
        assert_eq!(unavailable.error.as_deref(), Some("Model not loaded"));

        let malformed = RiskResult::malformed();
        assert_eq!(malformed.risk_level, RiskLevel::Error);
        assert!(malformed.error.is_none());
        assert!(!malformed.is_scored());
    }

    #[test]
    fn serializes_camel_case_without_empty_error() {
        let value = serde_json::to_value(RiskResult::scored(0.75)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "riskScore": 0.75,
                "riskLevel": "HIGH",
                "modelVersion": "v1",
            })
        );

        let value = serde_json::to_value(RiskResult::failed("boom")).unwrap();
        assert_eq!(value["error"], "boom");
        assert_eq!(value["riskLevel"], "ERROR");
    }
}
