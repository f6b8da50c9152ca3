//! Application services.

mod risk;

pub use risk::RiskScorer;
