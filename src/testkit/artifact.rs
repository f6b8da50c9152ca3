//! Model artifact documents.

use serde_json::{json, Value};

/// Logistic pipeline over every numeric column plus one-hot soil type.
///
/// Only `areaDiff` carries weight, so the suspicious probability is
/// `sigmoid(areaDiff - 2)`: 0.5 at an area discrepancy of 2.
#[must_use]
pub fn logistic() -> Value {
    json!({
        "preprocess": {
            "numeric": [
                { "column": "carbonAmount", "mean": 0.0, "scale": 1.0 },
                { "column": "validityYears", "mean": 0.0, "scale": 1.0 },
                { "column": "landArea", "mean": 0.0, "scale": 1.0 },
                { "column": "latitude", "mean": 0.0, "scale": 1.0 },
                { "column": "longitude", "mean": 0.0, "scale": 1.0 },
                { "column": "areaDiff", "mean": 0.0, "scale": 1.0 },
                { "column": "cropTypesCount", "mean": 0.0, "scale": 1.0 },
                { "column": "hasIrrigation", "mean": 0.0, "scale": 1.0 },
            ],
            "categorical": [
                { "column": "soilType", "categories": ["CLAY", "LOAMY", "SANDY"] },
            ],
        },
        "estimator": {
            "kind": "logistic_regression",
            "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "intercept": -2.0,
        },
    })
}

/// Valid artifact whose estimator has no probability prediction.
#[must_use]
pub fn linear_svc() -> Value {
    json!({
        "preprocess": { "numeric": [{ "column": "areaDiff" }] },
        "estimator": { "kind": "linear_svc", "coefficients": [1.0], "intercept": 0.0 },
    })
}

/// Logistic artifact trained on a different column layout.
#[must_use]
pub fn wrong_width() -> Value {
    json!({
        "preprocess": { "numeric": [{ "column": "areaDiff" }, { "column": "landArea" }] },
        "estimator": { "kind": "logistic_regression", "coefficients": [1.0], "intercept": 0.0 },
    })
}
