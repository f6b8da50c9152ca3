//! Scoring domain: payload parsing, feature derivation and risk levels.
//!
//! Nothing in this module performs I/O or knows about the classifier.

pub mod coerce;
pub mod feature;
pub mod payload;
pub mod score;

pub use feature::{build_feature_row, FeatureRow, FeatureValue, FEATURE_COLUMNS};
pub use payload::{CarbonProject, FarmDetails, Farmer, FarmerAddress, Land, RiskPayload};
pub use score::{RiskLevel, RiskResult, MODEL_VERSION};
