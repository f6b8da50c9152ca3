//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`model`] - Stub [`ProbabilityModel`](crate::port::ProbabilityModel)
//!   implementations: `FixedModel`, `FailingModel`, `RecordingModel`.
//! - [`payload`] - Canonical request payloads.
//! - [`artifact`] - Model artifact documents for loader tests.

pub mod artifact;
pub mod model;
pub mod payload;
