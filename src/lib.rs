//! econe-risk - Fraud risk scoring for carbon-offset projects.
//!
//! Given a carbon project, the land parcel behind it and the farmer who
//! farms it, the crate derives a fixed ten-column feature row, runs it
//! through a pre-trained binary classifier and reports a risk score, a risk
//! level and a model version.
//!
//! # Architecture
//!
//! - **`domain`** - Payload parsing, feature derivation, risk levels (no I/O)
//! - **`port`** - The classifier contract (`ProbabilityModel`, `ModelHandle`)
//! - **`adapter::model`** - JSON model artifact and its loader
//! - **`adapter::http`** - HTTP boundary with request validation
//! - **`service`** - `RiskScorer`, which never fails to produce a result
//!
//! # Modules
//!
//! - [`app`] - Configuration loading and process wiring
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//! - `testkit` - Stub models and fixtures (requires `testkit` feature)
//!
//! # Example
//!
//! ```
//! use econe_risk::domain::RiskLevel;
//! use econe_risk::service::RiskScorer;
//! use serde_json::json;
//!
//! let scorer = RiskScorer::unavailable();
//! let result = scorer.predict_risk(&json!({ "land": { "landArea": 4.0 } }));
//!
//! assert_eq!(result.risk_level, RiskLevel::Unknown);
//! assert_eq!(result.error.as_deref(), Some("Model not loaded"));
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
